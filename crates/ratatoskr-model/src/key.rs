//! Group-scoped tag identifiers.

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Separator between the group and tag halves of a composite key.
///
/// Group and tag names must not contain it. Names are not escaped or
/// rejected; a name containing the delimiter splits at its first occurrence.
pub const GROUP_DELIMITER: &str = "::";

/// A tag identifier qualified by its owning group, rendered as `group::tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupScopedTag {
    group: String,
    tag: String,
}

impl GroupScopedTag {
    pub fn new(group: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            tag: tag.into(),
        }
    }

    /// Split a composite key on the first delimiter occurrence.
    pub fn parse(key: &str) -> Result<Self, ModelError> {
        key.split_once(GROUP_DELIMITER)
            .map(|(group, tag)| Self::new(group, tag))
            .ok_or_else(|| ModelError::MissingDelimiter(key.to_string()))
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `group::tag` form used as a selection identifier.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn into_parts(self) -> (String, String) {
        (self.group, self.tag)
    }
}

impl fmt::Display for GroupScopedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{GROUP_DELIMITER}{}", self.group, self.tag)
    }
}

impl FromStr for GroupScopedTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_delimiter() {
        assert_eq!(GroupScopedTag::new("animals", "cat").key(), "animals::cat");
    }

    #[test]
    fn splits_on_first_delimiter() {
        let scoped = GroupScopedTag::parse("a::b::c").unwrap();
        assert_eq!(scoped.group(), "a");
        assert_eq!(scoped.tag(), "b::c");
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        assert_eq!(
            "plain".parse::<GroupScopedTag>(),
            Err(ModelError::MissingDelimiter("plain".to_string()))
        );
    }

    #[test]
    fn empty_halves_are_kept() {
        let scoped = GroupScopedTag::parse("::tag").unwrap();
        assert_eq!(scoped.group(), "");
        assert_eq!(scoped.tag(), "tag");
    }
}
