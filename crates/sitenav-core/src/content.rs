//! Known content pages.

use std::collections::BTreeSet;

use crate::path::normalize_page_path;

/// Snapshot of the page paths that exist in the content source.
///
/// Paths are stored normalised (see [`normalize_page_path`]), so
/// `/guide/install.md` and `/guide/install` refer to the same page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentIndex {
    paths: BTreeSet<String>,
}

impl ContentIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page path.
    pub fn insert(&mut self, path: &str) {
        self.paths.insert(normalize_page_path(path));
    }

    /// Check whether a page path exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.contains_normalized(&normalize_page_path(path))
    }

    pub(crate) fn contains_normalized(&self, normalized: &str) -> bool {
        self.paths.contains(normalized)
    }

    /// Number of known pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no pages are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over normalised paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ContentIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        for path in iter {
            index.insert(path.as_ref());
        }
        index
    }
}

impl<S: AsRef<str>> Extend<S> for ContentIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for path in iter {
            self.insert(path.as_ref());
        }
    }
}
