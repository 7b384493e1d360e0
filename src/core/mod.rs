pub mod config;
pub mod error;
pub mod listener;
pub mod middleware;
