//! Widget configuration.

use ratatoskr_model::SelectionLayout;
use ratatoskr_persistence::ThrottleConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};
use crate::submit::PayloadShape;

/// Storage key used by the deployed widget. The misspelling is part of the
/// key and must stay for stored selections to be found.
pub const DEFAULT_STORAGE_KEY: &str = "ratatosrk-persistant-tags";

/// Settings for one widget instance.
///
/// Every field has a default matching the deployed page, so an empty JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// The single storage key holding the persisted record.
    pub storage_key: String,

    /// Whether tags are grouped.
    pub layout: SelectionLayout,

    /// Shape of the `data`/`tags` part of the submission.
    pub payload: PayloadShape,

    /// Rate limit for scroll position writes.
    pub scroll: ThrottleConfig,

    /// CSS custom property on the root element that drives transitions.
    pub transition_property: String,

    /// Selector for group open/close controls (grouped layout only).
    pub group_selector: String,

    /// Selector for tag controls.
    pub tag_selector: String,

    /// Selector for the container whose id scopes a tag (grouped layout only).
    pub group_container: String,

    /// Id of the submit button.
    pub submit_id: String,

    /// Query parameter carrying the message identifier.
    pub message_param: String,

    /// Query parameter carrying the media identifier(s).
    pub media_param: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            layout: SelectionLayout::Grouped,
            payload: PayloadShape::Grouped,
            scroll: ThrottleConfig::default(),
            transition_property: "--transition-duration".to_string(),
            group_selector: r#"input[data-type="group"]"#.to_string(),
            tag_selector: r#"input[data-type="tag"]"#.to_string(),
            group_container: "ul".to_string(),
            submit_id: "callback".to_string(),
            message_param: "message-id".to_string(),
            media_param: "media-id".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Configuration for an ungrouped checklist.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            layout: SelectionLayout::Flat,
            payload: PayloadShape::Flat,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| WidgetError::ConfigParse { source: e })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(WidgetError::InvalidConfig {
                message: "storage_key must not be empty".to_string(),
            });
        }
        if !self.layout.is_grouped() && self.payload.needs_groups() {
            return Err(WidgetError::InvalidConfig {
                message: format!(
                    "payload shape '{}' requires the grouped layout",
                    self.payload.label()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.scroll.interval_ms, 100);
    }

    #[test]
    fn partial_override() {
        let config =
            WidgetConfig::from_json(r#"{"submit_id":"send","scroll":{"interval_ms":250}}"#)
                .unwrap();
        assert_eq!(config.submit_id, "send");
        assert_eq!(config.scroll.interval_ms, 250);
        assert_eq!(config.message_param, "message-id");
    }

    #[test]
    fn flat_layout_rejects_grouped_payload() {
        let err = WidgetConfig::from_json(r#"{"layout":"flat","payload":"pairs"}"#).unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfig { .. }));
        assert!(WidgetConfig::flat().validate().is_ok());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            WidgetConfig::from_json("[1,2]"),
            Err(WidgetError::ConfigParse { .. })
        ));
    }
}
