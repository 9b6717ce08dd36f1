//! Round trips between the user, the agent, and the interaction store.
//!
//! # Submission modes
//!
//! Both ways of reaching the agent go through [`ChatSync::submit`]:
//!
//! - [`SubmitMode::AsConversation`]: the user's text is appended to the
//!   transcript before the request is sent. On success the reply's record
//!   fields (if any) are merged, then the assistant text is appended. On
//!   failure nothing more is written, so the user message stays
//!   unanswered.
//! - [`SubmitMode::AsDirectLog`]: a message is synthesized from the
//!   current record and sent. The store is left alone either way; the
//!   caller reports the returned [`SubmitOutcome`] to the user.
//!
//! # Ordering
//!
//! Submissions are not serialized. Several may be in flight at once and
//! replies are applied in the order they arrive, which need not match the
//! order they were sent. Turn numbers only tag log lines.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{Instrument, info, info_span, warn};

use hcp_core::models::chat::ChatMessage;
use hcp_store::InteractionStore;

use crate::error::AgentError;
use crate::prompt::direct_log_message;
use crate::transport::ChatTransport;
use crate::wire::ChatRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    AsConversation(String),
    AsDirectLog,
}

impl SubmitMode {
    fn label(&self) -> &'static str {
        match self {
            SubmitMode::AsConversation(_) => "conversation",
            SubmitMode::AsDirectLog => "direct_log",
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Conversation reply appended; `merged_fields` tells whether the
    /// reply also updated the record.
    Replied { turn: u64, merged_fields: bool },
    /// Direct log accepted by the agent.
    Logged { turn: u64 },
    Failed { turn: u64, error: AgentError },
}

impl SubmitOutcome {
    pub fn turn(&self) -> u64 {
        match self {
            SubmitOutcome::Replied { turn, .. }
            | SubmitOutcome::Logged { turn }
            | SubmitOutcome::Failed { turn, .. } => *turn,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, SubmitOutcome::Failed { .. })
    }
}

/// Chat client bound to one store.
///
/// Cheap to clone; clones share the transport, the store and the turn
/// counter.
pub struct ChatSync<T> {
    transport: Arc<T>,
    store: InteractionStore,
    turns: Arc<AtomicU64>,
}

impl<T> Clone for ChatSync<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            store: self.store.clone(),
            turns: Arc::clone(&self.turns),
        }
    }
}

impl<T: ChatTransport> ChatSync<T> {
    pub fn new(transport: T, store: InteractionStore) -> Self {
        Self {
            transport: Arc::new(transport),
            store,
            turns: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn store(&self) -> &InteractionStore {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the user's text as a conversation turn. Empty text is sent
    /// as-is.
    pub async fn send_chat(&self, user_text: impl Into<String>) -> SubmitOutcome {
        self.submit(SubmitMode::AsConversation(user_text.into()))
            .await
    }

    /// Ask the agent to log the current record.
    pub async fn log_interaction_direct(&self) -> SubmitOutcome {
        self.submit(SubmitMode::AsDirectLog).await
    }

    /// Run one round trip. Never returns an error: failures are logged and
    /// reported as [`SubmitOutcome::Failed`].
    pub async fn submit(&self, mode: SubmitMode) -> SubmitOutcome {
        let turn = self.turns.fetch_add(1, Ordering::Relaxed) + 1;
        let span = info_span!("submit", turn, mode = mode.label());
        self.run(turn, mode).instrument(span).await
    }

    async fn run(&self, turn: u64, mode: SubmitMode) -> SubmitOutcome {
        let conversational = matches!(mode, SubmitMode::AsConversation(_));
        let message = match mode {
            SubmitMode::AsConversation(text) => {
                self.store.append_message(ChatMessage::user(text.clone()));
                text
            }
            SubmitMode::AsDirectLog => direct_log_message(&self.store.record()),
        };

        let reply = match self.transport.post_chat(&ChatRequest::new(message)).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, "error communicating with AI agent");
                return SubmitOutcome::Failed { turn, error };
            }
        };

        if !conversational {
            info!("interaction logged");
            return SubmitOutcome::Logged { turn };
        }

        let merged_fields = match reply.record_patch() {
            Some(patch) => {
                info!(?patch, "agent returned record fields");
                self.store.merge_fields(patch.clone());
                true
            }
            None => false,
        };
        self.store
            .append_message(ChatMessage::assistant(reply.reply_text()));
        info!(merged_fields, "reply applied");

        SubmitOutcome::Replied {
            turn,
            merged_fields,
        }
    }
}
