//! Project identifiers and conversation summaries.
//!
//! A [`ProjectId`] is the only key used to scope a conversation read. The
//! records themselves are owned by the external store; the gateway only cares
//! how many came back and whether the read succeeded, so each record is kept
//! as the raw JSON object the store produced.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Longest project identifier accepted, in bytes.
pub const MAX_PROJECT_ID_LEN: usize = 256;

/// Opaque identifier of a project.
///
/// Constructed only through [`ProjectId::parse`], so holding one means the
/// value is non-blank, bounded, and free of control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Validate a raw identifier as supplied by a caller.
    ///
    /// The value is kept verbatim; it is never trimmed or case-folded.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::InvalidProjectId(
                "project id must not be empty".to_string(),
            ));
        }
        if raw.len() > MAX_PROJECT_ID_LEN {
            return Err(ValidationError::InvalidProjectId(format!(
                "project id exceeds {MAX_PROJECT_ID_LEN} bytes"
            )));
        }
        if raw.chars().any(char::is_control) {
            return Err(ValidationError::InvalidProjectId(
                "project id contains control characters".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Column that scopes a record to its project.
pub const PROJECT_ID_FIELD: &str = "project_id";

/// One prior interaction session belonging to a project.
///
/// The record is kept exactly as the store returned it. Column types are not
/// enforced, so a numeric `id` or a null `created_at` passes through; only the
/// project column is inspected, and only by [`ConversationSummary::belongs_to`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationSummary(Map<String, Value>);

impl ConversationSummary {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// The record's `id` column, whatever its JSON type.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// The project column as text. Numbers are rendered in decimal.
    pub fn project_id(&self) -> Option<String> {
        self.0.get(PROJECT_ID_FIELD).and_then(scalar_text)
    }

    /// `created_at` when it holds an RFC 3339 timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Whether this record may be returned for `project_id`.
    ///
    /// A record without a project column (or with a null one) is not
    /// attributed to any other project and counts as in scope.
    pub fn belongs_to(&self, project_id: &ProjectId) -> bool {
        match self.0.get(PROJECT_ID_FIELD) {
            None | Some(Value::Null) => true,
            Some(value) => scalar_text(value).is_some_and(|text| text == project_id.as_str()),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_opaque_tokens() {
        for raw in ["proj-42", "p1", "7b0e5c1a-0000-4000-8000-000000000000", "a b"] {
            let id = ProjectId::parse(raw).unwrap();
            assert_eq!(id.as_str(), raw);
        }
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(matches!(
            ProjectId::parse(""),
            Err(ValidationError::InvalidProjectId(_))
        ));
        assert!(matches!(
            ProjectId::parse("   "),
            Err(ValidationError::InvalidProjectId(_))
        ));
    }

    #[test]
    fn parse_rejects_control_characters() {
        let err = ProjectId::parse("proj\n42").unwrap_err();
        assert!(err.to_string().contains("control characters"));
    }

    #[test]
    fn parse_rejects_overlong() {
        let raw = "x".repeat(MAX_PROJECT_ID_LEN + 1);
        assert!(ProjectId::parse(&raw).is_err());
        let raw = "x".repeat(MAX_PROJECT_ID_LEN);
        assert!(ProjectId::parse(&raw).is_ok());
    }

    fn project(id: &str) -> ProjectId {
        ProjectId::parse(id).unwrap()
    }

    #[test]
    fn summary_keeps_every_column() {
        let json = serde_json::json!({
            "id": "c1",
            "project_id": "proj-42",
            "title": "First session",
            "created_at": "2025-03-01T10:00:00.123456+00:00",
            "updated_at": null,
            "model": "gpt-4o",
            "message_count": 12
        });

        let summary: ConversationSummary = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(summary.get("title").unwrap(), "First session");
        assert_eq!(summary.get("message_count").unwrap(), 12);
        assert!(summary.created_at().is_some());

        let back = serde_json::to_value(&summary).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn summary_accepts_loosely_typed_columns() {
        let json = serde_json::json!({
            "id": 17,
            "project_id": "proj-42",
            "title": null,
            "created_at": null
        });

        let summary: ConversationSummary = serde_json::from_value(json).unwrap();
        assert_eq!(summary.id().unwrap(), 17);
        assert!(summary.created_at().is_none());
        assert!(summary.belongs_to(&project("proj-42")));
    }

    #[test]
    fn summary_rejects_non_object_rows() {
        assert!(serde_json::from_value::<ConversationSummary>(serde_json::json!(17)).is_err());
        assert!(serde_json::from_value::<ConversationSummary>(serde_json::json!(["c1"])).is_err());
    }

    #[test]
    fn numeric_project_column_matches_its_decimal_form() {
        let summary: ConversationSummary =
            serde_json::from_value(serde_json::json!({ "id": 1, "project_id": 42 })).unwrap();
        assert_eq!(summary.project_id().as_deref(), Some("42"));
        assert!(summary.belongs_to(&project("42")));
        assert!(!summary.belongs_to(&project("proj-42")));
    }

    #[test]
    fn project_column_decides_scope() {
        let other: ConversationSummary =
            serde_json::from_value(serde_json::json!({ "project_id": "proj-7" })).unwrap();
        assert!(!other.belongs_to(&project("proj-42")));

        let odd: ConversationSummary =
            serde_json::from_value(serde_json::json!({ "project_id": { "id": "proj-42" } })).unwrap();
        assert!(!odd.belongs_to(&project("proj-42")));

        let unscoped: ConversationSummary =
            serde_json::from_value(serde_json::json!({ "id": "c3", "project_id": null })).unwrap();
        assert!(unscoped.belongs_to(&project("proj-42")));
        assert!(ConversationSummary::default().belongs_to(&project("proj-42")));
    }
}
