//! CLI command handlers

pub mod commands;

pub use commands::{fill, init_logging, load_config, scan, FillOptions};
