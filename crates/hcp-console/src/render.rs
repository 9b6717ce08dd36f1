//! Plain-text views of the interaction state.

use hcp_core::models::chat::{ChatMessage, ChatRole};
use hcp_core::models::record::{FIELD_NAMES, InteractionRecord};
use hcp_core::models::state::InteractionState;

fn label(field: &str) -> &'static str {
    match field {
        "hcp_name" => "Healthcare Professional",
        "interaction_type" => "Interaction Type",
        "summary" => "Meeting Summary",
        "sentiment" => "Sentiment",
        "next_step" => "Next Step",
        _ => "?",
    }
}

pub fn render_form(record: &InteractionRecord) -> String {
    let mut out = String::from("── Log Interaction ──\n");
    for field in FIELD_NAMES {
        let value = record.get(field).unwrap_or_default();
        out.push_str(&format!("{:<24} {}\n", label(field), value));
    }
    out
}

pub fn render_message(message: &ChatMessage) -> String {
    let who = match message.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "agent",
    };
    format!("[{who}] {}", message.content)
}

pub fn render_state(state: &InteractionState) -> String {
    let mut out = render_form(&state.record);
    out.push_str("── Conversation ──\n");
    if state.transcript.is_empty() {
        out.push_str("(no messages yet)\n");
    }
    for message in &state.transcript {
        out.push_str(&render_message(message));
        out.push('\n');
    }
    out
}

/// Lines describing which form fields differ between `before` and `after`.
pub fn render_field_changes(before: &InteractionRecord, after: &InteractionRecord) -> Vec<String> {
    FIELD_NAMES
        .iter()
        .filter_map(|&field| {
            let new = after.get(field)?;
            (before.get(field) != Some(new)).then(|| format!("  * {}: {new}", label(field)))
        })
        .collect()
}
