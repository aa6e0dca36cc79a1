//! Submission payload and the host bridge.

use std::fmt;

use ratatoskr_model::{GroupScopedTag, MediaIds, SessionId, StringSet};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, WidgetError};
use crate::query::PageParams;

/// The host application's inbound channel.
///
/// One call per submission. Fire-and-forget: nothing comes back and nothing
/// is retried.
pub trait HostBridge {
    fn send_data(&self, data: &str);
}

/// How the selection part of the payload is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `"tags": ["animals::cat", ...]`, identifiers as selected.
    Flat,
    /// `"data": {"animals": ["cat", ...]}`
    #[default]
    Grouped,
    /// `"data": [["animals", "cat"], ...]`
    Pairs,
}

impl PayloadShape {
    /// Whether the shape splits identifiers into group and tag.
    pub const fn needs_groups(self) -> bool {
        !matches!(self, Self::Flat)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Grouped => "grouped",
            Self::Pairs => "pairs",
        }
    }
}

/// Tags keyed by group, groups in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTags {
    groups: Vec<(String, Vec<String>)>,
}

impl GroupedTags {
    /// Append `tag` to `group`, creating the group on first encounter.
    pub fn push(&mut self, group: String, tag: String) {
        match self.groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, tags)) => tags.push(tag),
            None => self.groups.push((group, vec![tag])),
        }
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, tags)| tags.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, tags)| (name.as_str(), tags.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GroupedTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (group, tags) in &self.groups {
            map.serialize_entry(group, tags)?;
        }
        map.end()
    }
}

/// Split `group::tag` identifiers and collect them per group.
///
/// Identifiers without the delimiter cannot be attributed to a group and
/// are dropped with a warning.
pub fn regroup<'a>(keys: impl IntoIterator<Item = &'a str>) -> GroupedTags {
    let mut grouped = GroupedTags::default();
    for (group, tag) in split_keys(keys) {
        grouped.push(group, tag);
    }
    grouped
}

fn split_keys<'a>(
    keys: impl IntoIterator<Item = &'a str>,
) -> impl Iterator<Item = (String, String)> {
    keys.into_iter().filter_map(|key| match GroupScopedTag::parse(key) {
        Ok(scoped) => Some(scoped.into_parts()),
        Err(e) => {
            tracing::warn!(%key, error = %e, "skipping ungrouped selection");
            None
        }
    })
}

/// The selection part of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selection {
    Flat { tags: Vec<String> },
    Grouped { data: GroupedTags },
    Pairs { data: Vec<(String, String)> },
}

/// What the host receives, as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub message_id: SessionId,
    pub media_ids: MediaIds,
    #[serde(flatten)]
    pub selection: Selection,
}

impl SubmissionPayload {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| WidgetError::Serialization { source: e })
    }
}

impl fmt::Display for SubmissionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = match &self.selection {
            Selection::Flat { tags } => tags.len(),
            Selection::Grouped { data } => data.iter().map(|(_, tags)| tags.len()).sum(),
            Selection::Pairs { data } => data.len(),
        };
        write!(f, "message {} ({count} tags)", self.message_id)
    }
}

/// Builds the payload from the in-memory selection at click time.
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    message_id: SessionId,
    media_ids: MediaIds,
    shape: PayloadShape,
}

impl SubmissionBuilder {
    pub fn new(params: &PageParams, shape: PayloadShape) -> Self {
        Self {
            message_id: params.message_id.clone(),
            media_ids: params.media_ids.clone(),
            shape,
        }
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }

    pub fn build(&self, selected: &StringSet) -> SubmissionPayload {
        let selection = match self.shape {
            PayloadShape::Flat => Selection::Flat {
                tags: selected.get(),
            },
            PayloadShape::Grouped => Selection::Grouped {
                data: regroup(selected.iter()),
            },
            PayloadShape::Pairs => Selection::Pairs {
                data: split_keys(selected.iter()).collect(),
            },
        };
        SubmissionPayload {
            message_id: self.message_id.clone(),
            media_ids: self.media_ids.clone(),
            selection,
        }
    }

    /// Serialize the selection and hand it to the bridge.
    pub fn submit<B: HostBridge + ?Sized>(&self, selected: &StringSet, bridge: &B) -> Result<()> {
        let payload = self.build(selected);
        let json = payload.to_json()?;
        tracing::info!(shape = self.shape.label(), "submitting {payload}");
        bridge.send_data(&json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regroup_keeps_first_encounter_order() {
        let grouped = regroup(["b::1", "a::x", "b::2", "a::y"]);
        let order: Vec<_> = grouped.iter().map(|(group, _)| group).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(grouped.get("b").unwrap(), ["1", "2"]);
        assert_eq!(grouped.get("a").unwrap(), ["x", "y"]);
    }

    #[test]
    fn regroup_skips_keys_without_delimiter() {
        let grouped = regroup(["loose", "g::t"]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.get("g").unwrap(), ["t"]);
    }

    #[test]
    fn grouped_map_serializes_in_order() {
        let grouped = regroup(["zeta::1", "alpha::2"]);
        assert_eq!(
            serde_json::to_string(&grouped).unwrap(),
            r#"{"zeta":["1"],"alpha":["2"]}"#
        );
    }
}
