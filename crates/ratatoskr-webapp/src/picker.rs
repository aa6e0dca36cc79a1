//! The assembled widget.

use std::time::Duration;

use ratatoskr_persistence::{PersistedSession, Storage};

use crate::config::WidgetConfig;
use crate::controller::{BindingId, SelectionController};
use crate::dom::{Document, DomNode, SubmitButton, Viewport};
use crate::error::Result;
use crate::query::PageParams;
use crate::submit::{HostBridge, SubmissionBuilder};
use crate::viewport::ViewportMemory;

/// One tag picker page.
///
/// [`start`](Self::start) performs the whole load sequence; the `on_*`
/// methods are the event handlers the embedding wires to the page.
#[derive(Debug)]
pub struct TagPicker<S: Storage, N> {
    config: WidgetConfig,
    params: PageParams,
    controller: SelectionController<S, N>,
    viewport: ViewportMemory,
    submission: SubmissionBuilder,
    submit_button: SubmitButton<N>,
}

impl<S: Storage, N: DomNode> TagPicker<S, N> {
    /// Load the page.
    ///
    /// Reads the identifiers from `query`, restores the stored record for
    /// that message, reflects it onto the controls and scrolls to the stored
    /// offset without animation. Any missing parameter or malformed control
    /// is fatal; storage problems are not.
    pub fn start<D, V>(
        query: &str,
        document: &D,
        viewport: &V,
        storage: S,
        config: WidgetConfig,
    ) -> Result<Self>
    where
        D: Document<Node = N> + ?Sized,
        V: Viewport + ?Sized,
    {
        config.validate()?;
        let params = PageParams::from_query(query, &config)?;
        let session =
            PersistedSession::load(storage, config.storage_key.as_str(), &params.message_id);
        let scroll_y = session.record().scroll_y;

        let memory = ViewportMemory::new(&config);
        let controller = memory.restore(viewport, scroll_y, || {
            SelectionController::bind(document, session, &config)
        })?;
        let submit_button = SubmitButton::find(document, &config.submit_id)?;
        let submission = SubmissionBuilder::new(&params, config.payload);

        tracing::info!(
            message_id = %params.message_id,
            media_ids = %params.media_ids,
            layout = %config.layout,
            restored = controller.session().outcome().is_restored(),
            "tag picker started"
        );

        Ok(Self {
            config,
            params,
            controller,
            viewport: memory,
            submission,
            submit_button,
        })
    }

    /// A control was toggled. Returns whether its identifier is now selected.
    pub fn on_toggle(&mut self, id: BindingId) -> Result<bool> {
        self.controller.on_toggle(id)
    }

    /// The window scrolled. `now` is any monotonic clock reading.
    pub fn on_scroll(&mut self, now: Duration, scroll_y: f64) -> bool {
        self.viewport.on_scroll(now, scroll_y, self.controller.session_mut())
    }

    /// The page is going away.
    pub fn on_unload(&mut self, scroll_y: f64) {
        self.viewport.flush(scroll_y, self.controller.session_mut());
    }

    /// The submit button was pressed.
    pub fn on_submit<B: HostBridge + ?Sized>(&self, bridge: &B) -> Result<()> {
        self.submission.submit(self.controller.selected_tags(), bridge)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn params(&self) -> &PageParams {
        &self.params
    }

    pub fn controller(&self) -> &SelectionController<S, N> {
        &self.controller
    }

    pub fn submit_button(&self) -> &SubmitButton<N> {
        &self.submit_button
    }
}

#[cfg(test)]
mod tests {
    use ratatoskr_persistence::MemoryStorage;

    use super::*;
    use crate::error::WidgetError;
    use crate::headless::{HeadlessDocument, HeadlessNode, HeadlessViewport};

    #[test]
    fn submit_button_must_be_a_button() {
        let document = HeadlessDocument::new();
        document
            .root()
            .append(HeadlessNode::element("div").with_attr("id", "callback"));

        let err = TagPicker::start(
            "message-id=1&media-id=2",
            &document,
            &HeadlessViewport::new(),
            MemoryStorage::new(),
            WidgetConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WidgetError::WrongElementKind { .. }), "{err}");
    }

    #[test]
    fn invalid_config_is_rejected_before_anything_loads() {
        let storage = MemoryStorage::new();
        let config = WidgetConfig {
            storage_key: String::new(),
            ..Default::default()
        };
        let err = TagPicker::start(
            "message-id=1&media-id=2",
            &HeadlessDocument::new(),
            &HeadlessViewport::new(),
            storage.clone(),
            config,
        )
        .unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfig { .. }));
        assert_eq!(storage.write_count(), 0);
    }
}
