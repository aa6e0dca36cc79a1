//! Selection model for the Ratatoskr tag picker.
//!
//! The types here carry no DOM or storage concerns:
//!
//! - [`StringSet`] - insertion-ordered set with toggle semantics
//! - [`GroupScopedTag`] - `group::tag` composite keys
//! - [`SessionId`] / [`MediaIds`] - identifiers read from the page URL
//! - [`SelectionLayout`] - flat or grouped checklist

pub mod error;
pub mod ids;
pub mod key;
pub mod layout;
pub mod set;

pub use error::{ModelError, Result};
pub use ids::{MediaIds, SessionId};
pub use key::{GROUP_DELIMITER, GroupScopedTag};
pub use layout::SelectionLayout;
pub use set::StringSet;
