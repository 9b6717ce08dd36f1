use hcp_core::error::CoreError;
use hcp_core::models::chat::{ChatMessage, ChatRole, ChatTranscript};
use hcp_core::models::record::{FIELD_NAMES, InteractionRecord, RecordPatch};

#[test]
fn empty_patch_is_a_no_op() {
    let mut record = InteractionRecord {
        hcp_name: "Dr. Lee".to_string(),
        summary: "Discussed dosing.".to_string(),
        ..Default::default()
    };
    let before = record.clone();

    let patch = RecordPatch::default();
    assert!(patch.is_empty());
    patch.apply_to(&mut record);

    assert_eq!(record, before);
}

#[test]
fn patch_overwrites_only_given_fields() {
    let mut record = InteractionRecord {
        hcp_name: "Dr. Lee".to_string(),
        sentiment: "Neutral".to_string(),
        ..Default::default()
    };

    RecordPatch {
        sentiment: Some("Positive".to_string()),
        next_step: Some(String::new()),
        ..Default::default()
    }
    .apply_to(&mut record);

    assert_eq!(record.hcp_name, "Dr. Lee");
    assert_eq!(record.sentiment, "Positive");
    assert_eq!(record.next_step, "");
}

#[test]
fn then_matches_sequential_application() {
    let a = RecordPatch {
        hcp_name: Some("Dr. Lee".to_string()),
        summary: Some("first".to_string()),
        ..Default::default()
    };
    let b = RecordPatch {
        summary: Some("second".to_string()),
        sentiment: Some("Concerned".to_string()),
        ..Default::default()
    };

    let mut sequential = InteractionRecord::default();
    a.clone().apply_to(&mut sequential);
    b.clone().apply_to(&mut sequential);

    let mut folded = InteractionRecord::default();
    a.then(b).apply_to(&mut folded);

    assert_eq!(sequential, folded);
    assert_eq!(folded.summary, "second");
    assert_eq!(folded.hcp_name, "Dr. Lee");
}

#[test]
fn field_builds_single_field_patch() {
    for name in FIELD_NAMES {
        let patch = RecordPatch::field(name, "x").unwrap();
        let mut record = InteractionRecord::default();
        patch.apply_to(&mut record);
        assert_eq!(record.get(name), Some("x"), "field {name}");
    }
}

#[test]
fn field_rejects_unknown_name() {
    let err = RecordPatch::field("specialty", "cardiology").unwrap_err();
    assert!(matches!(err, CoreError::UnknownField(name) if name == "specialty"));
}

#[test]
fn patch_deserialization_is_strict() {
    let ok: RecordPatch = serde_json::from_str(r#"{"sentiment":"Positive"}"#).unwrap();
    assert_eq!(ok.sentiment.as_deref(), Some("Positive"));

    let null_field: RecordPatch = serde_json::from_str(r#"{"summary":null}"#).unwrap();
    assert_eq!(null_field.summary.as_deref(), Some(""));
    assert!(!null_field.is_empty());

    assert!(serde_json::from_str::<RecordPatch>(r#"{"mood":"good"}"#).is_err());
    assert!(serde_json::from_str::<RecordPatch>(r#"{"summary":42}"#).is_err());
}

#[test]
fn transcript_serializes_as_plain_list() {
    let mut transcript = ChatTranscript::default();
    transcript.push(ChatMessage::user("hi"));
    transcript.push(ChatMessage::assistant("hello"));

    let json = serde_json::to_value(&transcript).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "hello"},
        ])
    );
    assert_eq!(transcript.last().map(|m| m.role), Some(ChatRole::Assistant));
}
