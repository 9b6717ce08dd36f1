//! Messages synthesized on the user's behalf.

use hcp_core::models::record::InteractionRecord;

/// Build the chat message sent when the user saves the form directly.
///
/// Only the HCP name and summary are embedded; the agent is expected to
/// work out sentiment and next step itself.
pub fn direct_log_message(record: &InteractionRecord) -> String {
    format!(
        "Log this interaction for {}: {}",
        record.hcp_name, record.summary
    )
}
