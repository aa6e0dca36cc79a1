//! The persisted selection record and its validation.

use ratatoskr_model::SessionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single record kept in storage.
///
/// `session_id` is stored as `messageId`, the field name used by records the
/// deployed widget already wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    #[serde(rename = "messageId")]
    pub session_id: String,
    #[serde(default)]
    pub opened_groups: Vec<String>,
    pub selected_tags: Vec<String>,
    #[serde(default)]
    pub scroll_y: f64,
}

impl PersistedRecord {
    /// Empty record for `session_id`.
    pub fn fresh(session_id: &SessionId) -> Self {
        Self {
            session_id: session_id.as_str().to_string(),
            opened_groups: Vec::new(),
            selected_tags: Vec::new(),
            scroll_y: 0.0,
        }
    }

    /// Parse and validate a stored record against the current session.
    pub fn restore(raw: &str, expected: &SessionId) -> Result<Self, RecordRejection> {
        let record: Self = serde_json::from_str(raw)
            .map_err(|e| RecordRejection::Malformed(e.to_string()))?;

        if record.session_id != expected.as_str() {
            return Err(RecordRejection::SessionMismatch {
                stored: record.session_id,
            });
        }
        if !record.scroll_y.is_finite() || record.scroll_y < 0.0 {
            return Err(RecordRejection::InvalidScroll(record.scroll_y));
        }
        Ok(record)
    }

    /// Apply one field change.
    pub fn apply(&mut self, change: RecordUpdate) {
        match change {
            RecordUpdate::OpenedGroups(groups) => self.opened_groups = groups,
            RecordUpdate::SelectedTags(tags) => self.selected_tags = tags,
            // Overscroll can report negative offsets; stored values stay valid.
            RecordUpdate::ScrollY(y) => {
                self.scroll_y = if y.is_finite() { y.max(0.0) } else { 0.0 };
            }
        }
    }
}

/// A single-field change to the record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordUpdate {
    OpenedGroups(Vec<String>),
    SelectedTags(Vec<String>),
    ScrollY(f64),
}

impl RecordUpdate {
    /// Wire name of the field being changed.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::OpenedGroups(_) => "openedGroups",
            Self::SelectedTags(_) => "selectedTags",
            Self::ScrollY(_) => "scrollY",
        }
    }
}

/// Why a stored record was discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordRejection {
    #[error("record is not a valid selection record: {0}")]
    Malformed(String),
    #[error("record belongs to message {stored}")]
    SessionMismatch { stored: String },
    #[error("record has an invalid scroll offset {0}")]
    InvalidScroll(f64),
}

/// How the session obtained its record at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The stored record was valid for this session.
    Restored,
    /// Nothing was stored under the key.
    Missing,
    /// The backend failed to read.
    Unreadable(String),
    /// Something was stored but discarded.
    Rejected(RecordRejection),
}

impl LoadOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    #[test]
    fn restores_full_record() {
        let raw = r#"{"messageId":"42","openedGroups":["animals"],"selectedTags":["animals::cat"],"scrollY":120}"#;
        let record = PersistedRecord::restore(raw, &session("42")).unwrap();
        assert_eq!(record.opened_groups, vec!["animals"]);
        assert_eq!(record.selected_tags, vec!["animals::cat"]);
        assert_eq!(record.scroll_y, 120.0);
    }

    #[test]
    fn optional_fields_default() {
        let raw = r#"{"messageId":"42","selectedTags":["cat"]}"#;
        let record = PersistedRecord::restore(raw, &session("42")).unwrap();
        assert!(record.opened_groups.is_empty());
        assert_eq!(record.scroll_y, 0.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = r#"{"messageId":"42","selectedTags":[],"theme":"dark"}"#;
        assert!(PersistedRecord::restore(raw, &session("42")).is_ok());
    }

    #[test]
    fn rejects_other_session() {
        let raw = r#"{"messageId":"A","selectedTags":["cat"]}"#;
        assert_eq!(
            PersistedRecord::restore(raw, &session("B")),
            Err(RecordRejection::SessionMismatch {
                stored: "A".to_string()
            })
        );
    }

    #[test]
    fn rejects_bad_shapes() {
        let expected = session("42");
        for raw in [
            "not json",
            "null",
            "[]",
            r#"{"messageId":"42"}"#,
            r#"{"messageId":42,"selectedTags":[]}"#,
            r#"{"messageId":"42","selectedTags":["cat",7]}"#,
            r#"{"messageId":"42","selectedTags":"cat"}"#,
            r#"{"messageId":"42","selectedTags":[],"openedGroups":[null]}"#,
            r#"{"messageId":"42","selectedTags":[],"scrollY":"10"}"#,
        ] {
            assert!(
                matches!(
                    PersistedRecord::restore(raw, &expected),
                    Err(RecordRejection::Malformed(_))
                ),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn rejects_negative_scroll() {
        let raw = r#"{"messageId":"42","selectedTags":[],"scrollY":-5}"#;
        assert_eq!(
            PersistedRecord::restore(raw, &session("42")),
            Err(RecordRejection::InvalidScroll(-5.0))
        );
    }

    #[test]
    fn apply_clamps_scroll() {
        let mut record = PersistedRecord::fresh(&session("1"));
        record.apply(RecordUpdate::ScrollY(-12.5));
        assert_eq!(record.scroll_y, 0.0);
        record.apply(RecordUpdate::ScrollY(f64::NAN));
        assert_eq!(record.scroll_y, 0.0);
        record.apply(RecordUpdate::ScrollY(300.0));
        assert_eq!(record.scroll_y, 300.0);
    }

    #[test]
    fn serializes_with_wire_names() {
        let mut record = PersistedRecord::fresh(&session("7"));
        record.apply(RecordUpdate::SelectedTags(vec!["g::t".to_string()]));
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["messageId"], "7");
        assert_eq!(json["selectedTags"][0], "g::t");
        assert_eq!(json["openedGroups"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["scrollY"], 0.0);
    }
}
