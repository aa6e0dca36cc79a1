//! Scroll position memory.

use std::time::Duration;

use ratatoskr_persistence::{PersistedSession, RateLimiter, RecordUpdate, Storage};

use crate::config::WidgetConfig;
use crate::dom::Viewport;

/// Value the transition property is forced to while restoring.
const NO_TRANSITION: &str = "0ms";

/// Restores the scroll offset on load and records it afterwards.
#[derive(Debug, Clone)]
pub struct ViewportMemory {
    limiter: RateLimiter,
    transition_property: String,
}

impl ViewportMemory {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            limiter: RateLimiter::from_config(&config.scroll),
            transition_property: config.transition_property.clone(),
        }
    }

    /// Run `prepare` and jump to `scroll_y` with transitions disabled.
    ///
    /// The root element's transition property is set to `0ms` first, so
    /// neither the state `prepare` puts on the page (opened groups, checked
    /// tags) nor the jump itself animates. The previous value is put back
    /// afterwards, whatever `prepare` returned.
    pub fn restore<V, T>(&self, viewport: &V, scroll_y: f64, prepare: impl FnOnce() -> T) -> T
    where
        V: Viewport + ?Sized,
    {
        let previous = viewport.root_style_property(&self.transition_property);
        viewport.set_root_style_property(&self.transition_property, NO_TRANSITION);

        let out = prepare();
        viewport.scroll_to(scroll_y);

        viewport.set_root_style_property(&self.transition_property, &previous);
        tracing::debug!(scroll_y, "restored viewport");
        out
    }

    /// Record the offset unless a write already happened in this window.
    ///
    /// Returns whether a write was attempted.
    pub fn on_scroll<S: Storage>(
        &mut self,
        now: Duration,
        scroll_y: f64,
        session: &mut PersistedSession<S>,
    ) -> bool {
        if !self.limiter.attempt(now) {
            return false;
        }
        write_scroll(scroll_y, session);
        true
    }

    /// Record the offset unconditionally (page unload).
    ///
    /// A page restored from the back/forward cache keeps this instance, so
    /// the throttle window restarts here.
    pub fn flush<S: Storage>(&mut self, scroll_y: f64, session: &mut PersistedSession<S>) {
        write_scroll(scroll_y, session);
        self.limiter.reset();
    }
}

fn write_scroll<S: Storage>(scroll_y: f64, session: &mut PersistedSession<S>) {
    if let Err(e) = session.update(RecordUpdate::ScrollY(scroll_y)) {
        tracing::warn!(scroll_y, error = %e, "failed to persist scroll position");
    }
}

#[cfg(test)]
mod tests {
    use ratatoskr_model::SessionId;
    use ratatoskr_persistence::MemoryStorage;

    use super::*;
    use crate::headless::HeadlessViewport;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn restore_suppresses_transition_around_jump() {
        let viewport = HeadlessViewport::new();
        viewport.set_root_style_property("--transition-duration", "300ms");
        let memory = ViewportMemory::new(&WidgetConfig::default());

        let seen = memory.restore(&viewport, 480.0, || {
            viewport.root_style_property("--transition-duration")
        });

        assert_eq!(seen, "0ms");
        assert_eq!(viewport.scroll_y(), 480.0);
        assert_eq!(viewport.root_style_property("--transition-duration"), "300ms");
    }

    #[test]
    fn scroll_writes_are_throttled_but_flush_is_not() {
        let storage = MemoryStorage::new();
        let id = SessionId::new("5").unwrap();
        let mut session = PersistedSession::load(storage.clone(), "key", &id);
        let mut memory = ViewportMemory::new(&WidgetConfig::default());

        assert!(memory.on_scroll(ms(0), 10.0, &mut session));
        assert!(!memory.on_scroll(ms(40), 20.0, &mut session));
        assert!(!memory.on_scroll(ms(80), 30.0, &mut session));
        assert_eq!(storage.write_count(), 1);
        assert_eq!(session.record().scroll_y, 10.0);

        memory.flush(35.0, &mut session);
        assert_eq!(storage.write_count(), 2);
        assert_eq!(session.record().scroll_y, 35.0);
    }

    #[test]
    fn flush_restarts_the_throttle_window() {
        let storage = MemoryStorage::new();
        let id = SessionId::new("5").unwrap();
        let mut session = PersistedSession::load(storage.clone(), "key", &id);
        let mut memory = ViewportMemory::new(&WidgetConfig::default());

        assert!(memory.on_scroll(ms(0), 10.0, &mut session));
        memory.flush(20.0, &mut session);
        assert!(memory.on_scroll(ms(30), 30.0, &mut session));
        assert!(!memory.on_scroll(ms(60), 40.0, &mut session));
        assert_eq!(storage.write_count(), 3);
        assert_eq!(session.record().scroll_y, 30.0);
    }
}
