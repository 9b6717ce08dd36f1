use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Record field names, in form order. These are also the wire names the
/// agent uses in the `data` object of a chat reply.
pub const FIELD_NAMES: [&str; 5] = [
    "hcp_name",
    "interaction_type",
    "summary",
    "sentiment",
    "next_step",
];

/// The HCP interaction being logged.
///
/// Every field starts empty. Fields are only ever overwritten through a
/// [`RecordPatch`]; nothing is cross-validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(default)]
    pub hcp_name: String,
    #[serde(default)]
    pub interaction_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub next_step: String,
}

impl InteractionRecord {
    /// Look up a field value by its wire name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "hcp_name" => &self.hcp_name,
            "interaction_type" => &self.interaction_type,
            "summary" => &self.summary,
            "sentiment" => &self.sentiment,
            "next_step" => &self.next_step,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// A partial record: `None` leaves the field untouched, `Some` overwrites
/// it (an empty string included).
///
/// Deserialization is strict. Unknown keys and non-string values are
/// rejected, so a malformed agent payload never reaches the store. A key
/// that is present with `null` clears the field; an absent key leaves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordPatch {
    #[serde(
        default,
        deserialize_with = "null_clears",
        skip_serializing_if = "Option::is_none"
    )]
    pub hcp_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_clears",
        skip_serializing_if = "Option::is_none"
    )]
    pub interaction_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_clears",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_clears",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_clears",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_step: Option<String>,
}

/// Only called for keys that are present, so `null` becomes `Some("")`.
fn null_clears<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

impl RecordPatch {
    /// Build a single-field patch from a field's wire name.
    pub fn field(name: &str, value: impl Into<String>) -> Result<Self, CoreError> {
        let value = Some(value.into());
        let mut patch = Self::default();
        match name {
            "hcp_name" => patch.hcp_name = value,
            "interaction_type" => patch.interaction_type = value,
            "summary" => patch.summary = value,
            "sentiment" => patch.sentiment = value,
            "next_step" => patch.next_step = value,
            other => return Err(CoreError::UnknownField(other.to_string())),
        }
        Ok(patch)
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.hcp_name.is_none()
            && self.interaction_type.is_none()
            && self.summary.is_none()
            && self.sentiment.is_none()
            && self.next_step.is_none()
    }

    /// Shallow-merge into `record`. Last writer wins per field.
    pub fn apply_to(self, record: &mut InteractionRecord) {
        if let Some(v) = self.hcp_name {
            record.hcp_name = v;
        }
        if let Some(v) = self.interaction_type {
            record.interaction_type = v;
        }
        if let Some(v) = self.summary {
            record.summary = v;
        }
        if let Some(v) = self.sentiment {
            record.sentiment = v;
        }
        if let Some(v) = self.next_step {
            record.next_step = v;
        }
    }

    /// Combine two patches as if `later` were applied after `self`.
    pub fn then(self, later: RecordPatch) -> RecordPatch {
        RecordPatch {
            hcp_name: later.hcp_name.or(self.hcp_name),
            interaction_type: later.interaction_type.or(self.interaction_type),
            summary: later.summary.or(self.summary),
            sentiment: later.sentiment.or(self.sentiment),
            next_step: later.next_step.or(self.next_step),
        }
    }
}
