use hcp_agent::prompt::direct_log_message;
use hcp_core::models::record::InteractionRecord;

#[test]
fn embeds_name_and_summary() {
    let record = InteractionRecord {
        hcp_name: "Dr. Lee".to_string(),
        summary: "Discussed the new inhaler.".to_string(),
        sentiment: "Positive".to_string(),
        ..Default::default()
    };

    assert_eq!(
        direct_log_message(&record),
        "Log this interaction for Dr. Lee: Discussed the new inhaler."
    );
}

#[test]
fn empty_record_still_produces_message() {
    let message = direct_log_message(&InteractionRecord::default());
    assert_eq!(message, "Log this interaction for : ");
}

#[test]
fn ignores_other_fields() {
    let record = InteractionRecord {
        hcp_name: "Dr. Patel".to_string(),
        summary: "Short visit".to_string(),
        next_step: "Send samples".to_string(),
        interaction_type: "Virtual".to_string(),
        ..Default::default()
    };

    let message = direct_log_message(&record);
    assert!(!message.contains("Send samples"));
    assert!(!message.contains("Virtual"));
}
