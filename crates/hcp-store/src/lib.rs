//! hcp-store
//!
//! The interaction store: sole owner of the session's record and
//! transcript, with change notification for readers.

pub mod store;

pub use store::{InteractionStore, StoreObserver};
