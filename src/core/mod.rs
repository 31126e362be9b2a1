//! Core utilities shared by the caches and commands
//!
//! - `cache`: data directory location and atomic CSV file replacement

pub mod cache;

pub use cache::{default_data_dir, replace_csv};
