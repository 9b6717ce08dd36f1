//! hcp-agent
//!
//! Talks to the remote AI agent over HTTP and reconciles its replies into
//! the interaction store.

pub mod error;
pub mod prompt;
pub mod sync;
pub mod transport;
pub mod wire;

pub use sync::{ChatSync, SubmitMode, SubmitOutcome};
pub use transport::{ChatTransport, HttpTransport};
