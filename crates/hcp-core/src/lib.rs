//! hcp-core
//!
//! Pure domain types for logging an HCP interaction: the form-shaped
//! record, its partial patch, and the chat transcript.
//! No I/O. Shared vocabulary of the console.

pub mod error;
pub mod models;
