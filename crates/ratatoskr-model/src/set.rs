//! Insertion-ordered string set.

use serde::{Deserialize, Serialize};

/// An order-preserving set of selected identifiers.
///
/// Membership is unique and iteration follows first insertion. Removing an
/// identifier keeps the relative order of the remaining ones, so snapshots
/// serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StringSet {
    items: Vec<String>,
}

impl StringSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`.
    ///
    /// Returns the membership *before* the call: `false` when the identifier
    /// was just added, `true` when it was just removed.
    pub fn toggle(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        match self.position(&id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => {
                self.items.push(id);
                false
            }
        }
    }

    /// Snapshot of the current members in insertion order.
    ///
    /// The returned vector is detached from the set; re-fetch after further
    /// toggles.
    #[must_use]
    pub fn get(&self) -> Vec<String> {
        self.items.clone()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item == id)
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet {
    /// Duplicates collapse onto their first occurrence.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            let id = id.into();
            if !set.contains(&id) {
                set.items.push(id);
            }
        }
        set
    }
}

impl From<Vec<String>> for StringSet {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<StringSet> for Vec<String> {
    fn from(set: StringSet) -> Self {
        set.items
    }
}
