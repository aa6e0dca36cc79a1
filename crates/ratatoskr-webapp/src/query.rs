//! Identifiers from the page URL.

use ratatoskr_model::{MediaIds, SessionId};
use url::form_urlencoded;

use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};

/// The two identifiers the bot put on the web app URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub message_id: SessionId,
    pub media_ids: MediaIds,
}

impl PageParams {
    /// Read both identifiers from a query string (with or without the
    /// leading `?`).
    ///
    /// Only the first occurrence of each parameter counts. An empty value is
    /// the same as a missing one; both are fatal.
    pub fn from_query(query: &str, config: &WidgetConfig) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut message_id = None;
        let mut media_ids = None;
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if name == config.message_param.as_str() && message_id.is_none() {
                message_id = Some(value.into_owned());
            } else if name == config.media_param.as_str() && media_ids.is_none() {
                media_ids = Some(value.into_owned());
            }
        }

        let message_id = required(message_id, &config.message_param)?;
        let media_ids = required(media_ids, &config.media_param)?;
        Ok(Self {
            message_id: SessionId::new(message_id)?,
            media_ids: MediaIds::new(media_ids)?,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WidgetError::MissingQueryParam {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> Result<PageParams> {
        PageParams::from_query(query, &WidgetConfig::default())
    }

    #[test]
    fn reads_both_identifiers() {
        let params = parse("?message-id=42&media-id=7").unwrap();
        assert_eq!(params.message_id.as_str(), "42");
        assert_eq!(params.media_ids.as_str(), "7");
    }

    #[test]
    fn media_list_is_kept_verbatim() {
        let params = parse("message-id=3&media-id=1%2C2%2C3").unwrap();
        assert_eq!(params.media_ids.as_str(), "1,2,3");
    }

    #[test]
    fn first_occurrence_wins() {
        let params = parse("message-id=1&message-id=2&media-id=5").unwrap();
        assert_eq!(params.message_id.as_str(), "1");
    }

    #[test]
    fn missing_or_empty_is_fatal() {
        for (query, name) in [
            ("media-id=7", "message-id"),
            ("message-id=&media-id=7", "message-id"),
            ("message-id=42", "media-id"),
            ("", "message-id"),
        ] {
            match parse(query) {
                Err(WidgetError::MissingQueryParam { name: missing }) => assert_eq!(missing, name),
                other => panic!("{query}: expected missing {name}, got {other:?}"),
            }
        }
    }
}
