use std::fmt;

use serde::{Deserialize, Serialize};

/// How the checklist is organised on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionLayout {
    /// A single list; tag identifiers are the bare control names.
    Flat,
    /// Tags nested in named groups; identifiers are `group::tag` and the
    /// opened/closed state of each group is remembered too.
    #[default]
    Grouped,
}

impl SelectionLayout {
    #[must_use]
    pub const fn is_grouped(self) -> bool {
        matches!(self, Self::Grouped)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Grouped => "grouped",
        }
    }
}

impl fmt::Display for SelectionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
