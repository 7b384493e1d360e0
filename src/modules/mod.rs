//! Modules layer - Infrastructure components
//!
//! Contains adapters for the local filesystem.

pub mod storage;
