use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use hcp_core::models::chat::ChatMessage;
use hcp_core::models::record::{InteractionRecord, RecordPatch};
use hcp_core::models::state::InteractionState;

#[derive(Debug, Clone, Default)]
struct Versioned {
    revision: u64,
    state: InteractionState,
}

/// Holds the session's [`InteractionState`].
///
/// `merge_fields` and `append_message` are the only writes. Both are
/// synchronous and cannot fail; each bumps the revision and wakes every
/// [`StoreObserver`]. Clones share the same state.
#[derive(Debug, Clone)]
pub struct InteractionStore {
    tx: Arc<watch::Sender<Versioned>>,
}

impl Default for InteractionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Versioned::default());
        Self { tx: Arc::new(tx) }
    }

    /// Shallow-merge `patch` into the record. Keys absent from the patch
    /// are left untouched; an empty patch still counts as a mutation.
    pub fn merge_fields(&self, patch: RecordPatch) {
        self.tx.send_modify(|v| {
            patch.apply_to(&mut v.state.record);
            v.revision += 1;
            debug!(revision = v.revision, "record fields merged");
        });
    }

    /// Append one message to the end of the transcript.
    pub fn append_message(&self, message: ChatMessage) {
        self.tx.send_modify(|v| {
            v.state.transcript.push(message);
            v.revision += 1;
            debug!(
                revision = v.revision,
                len = v.state.transcript.len(),
                "chat message appended"
            );
        });
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> InteractionState {
        self.tx.borrow().state.clone()
    }

    /// Clone of the current record only.
    pub fn record(&self) -> InteractionRecord {
        self.tx.borrow().state.record.clone()
    }

    /// Number of mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }

    /// Read-only handle that is woken on every mutation.
    pub fn subscribe(&self) -> StoreObserver {
        StoreObserver {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of the store, held by renderers.
///
/// Notifications coalesce: an observer that falls behind sees only the
/// latest state, never the intermediate ones.
#[derive(Debug, Clone)]
pub struct StoreObserver {
    rx: watch::Receiver<Versioned>,
}

impl StoreObserver {
    /// Wait for a mutation not yet seen by this observer. Returns `false`
    /// once every store handle has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Clone of the latest state, marking it as seen.
    pub fn snapshot(&mut self) -> InteractionState {
        self.rx.borrow_and_update().state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.rx.borrow().revision
    }
}
