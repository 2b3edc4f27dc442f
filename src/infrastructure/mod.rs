//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_file, default_trace_file};
