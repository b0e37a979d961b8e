//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides the path resolution used by configuration and the
//! session vault.

pub mod paths;

pub use paths::{config_file, default_data_dir, session_file};
