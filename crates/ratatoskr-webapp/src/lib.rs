//! The Ratatoskr tag picker widget.
//!
//! Runs inside the Telegram in-app browser. The page lists tags (optionally
//! grouped); the widget remembers what the user ticked across reloads and,
//! when the user presses the submit button, sends the selection back to the
//! bot through `Telegram.WebApp.sendData`.
//!
//! # Flow
//!
//! ```text
//! load:     query string -> PageParams
//!           storage -> PersistedSession -> SelectionController -> controls
//!           PersistedSession.scrollY -> ViewportMemory -> window scroll
//! toggle:   control event -> StringSet -> PersistedSession (write-through)
//! scroll:   window scroll -> RateLimiter -> PersistedSession
//! unload:   window scroll -> PersistedSession (unconditional)
//! submit:   StringSet -> SubmissionBuilder -> HostBridge
//! ```
//!
//! The DOM, the viewport and the host bridge are reached through the traits
//! in [`dom`] and [`submit`]. [`headless`] implements them in memory; the
//! browser implementation lives in `web` and is only compiled for `wasm32`.

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod headless;
pub mod logging;
pub mod picker;
pub mod query;
pub mod submit;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::WidgetConfig;
pub use controller::{Binding, BindingId, ControlRole, SelectionController};
pub use dom::{Document, DomNode, GroupList, NodeKind, SubmitButton, ToggleControl, Viewport};
pub use error::{Result, WidgetError};
pub use picker::TagPicker;
pub use query::PageParams;
pub use submit::{
    GroupedTags, HostBridge, PayloadShape, Selection, SubmissionBuilder, SubmissionPayload,
    regroup,
};
pub use viewport::ViewportMemory;
