//! hcp-console library root.
//!
//! Re-exports internal modules so that integration tests can drive the
//! console without a terminal.

pub mod command;
pub mod config;
pub mod console;
pub mod render;
