//! Storage module for file management
//!
//! Provides the flat local-disk store that uploads are written to and the
//! random naming scheme used for stored files.

mod local_disk;
pub mod naming;

pub use local_disk::LocalDiskStorage;
pub use naming::{OsRandomSource, RandomSource};
