//! General utilities for the stage core.
//!
//! - [`fs`]: filesystem helpers used by logging and configuration.

pub mod fs;

pub use fs::ensure_dir_exists;
