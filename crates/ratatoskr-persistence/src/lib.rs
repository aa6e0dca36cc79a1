//! Persistent selection state for the Ratatoskr tag picker.
//!
//! One fixed record lives under one fixed storage key. It is read once when
//! the page loads, validated against the current message identifier, and
//! rewritten in full on every change.
//!
//! # Record format
//!
//! ```text
//! {
//!   "messageId": "42",
//!   "openedGroups": ["animals"],
//!   "selectedTags": ["animals::cat"],
//!   "scrollY": 120
//! }
//! ```
//!
//! A record that is absent, unparsable, shaped differently or written for
//! another message is discarded and replaced by an empty one. There is no
//! schema version; shape validation is the only migration mechanism.
//!
//! # Architecture
//!
//! - `storage.rs` - the [`Storage`] key/value seam and [`MemoryStorage`]
//! - `io/` - [`FileStorage`], a directory-backed store with atomic writes
//! - `record.rs` - [`PersistedRecord`] and its validation
//! - `session.rs` - [`PersistedSession`], the write-through cache
//! - `throttle/` - [`RateLimiter`] for high-frequency writes
//! - `error.rs` - error types with user-friendly messages

mod error;
mod io;
mod record;
mod session;
mod storage;
mod throttle;

pub use error::{PersistenceError, Result};
pub use io::FileStorage;
pub use record::{LoadOutcome, PersistedRecord, RecordRejection, RecordUpdate};
pub use session::PersistedSession;
pub use storage::{MemoryStorage, Storage};
pub use throttle::{RateLimiter, ThrottleConfig};
