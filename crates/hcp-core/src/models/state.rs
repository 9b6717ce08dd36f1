use serde::{Deserialize, Serialize};

use super::chat::ChatTranscript;
use super::record::InteractionRecord;

/// The one record being logged plus the conversation about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub record: InteractionRecord,
    pub transcript: ChatTranscript,
}
