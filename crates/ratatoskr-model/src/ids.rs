//! Identifiers read once from the page query string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The message identifier scoping the persisted selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ModelError::EmptySessionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Media identifier(s), forwarded to the host as-is.
///
/// The value may be a comma-separated list; it is never split or parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaIds(String);

impl MediaIds {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ModelError::EmptyMediaIds);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifiers_are_rejected() {
        assert_eq!(SessionId::new(""), Err(ModelError::EmptySessionId));
        assert_eq!(MediaIds::new(""), Err(ModelError::EmptyMediaIds));
    }

    #[test]
    fn media_ids_stay_opaque() {
        let ids = MediaIds::new("7,8,9").unwrap();
        assert_eq!(ids.as_str(), "7,8,9");
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#""7,8,9""#);
    }
}
