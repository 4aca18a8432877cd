//! Per-locale navigation bundles.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::node::{Group, NavigationNode};

/// Entry of the version dropdown (other doc versions, changelog).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionLink {
    /// Display label.
    pub label: String,
    /// Target URL, absolute `http(s)` or relative.
    pub url: String,
}

/// Complete navigation and text definition for one language variant.
///
/// Bundles are produced by [`load_bundles`](crate::load_bundles) and are
/// read-only afterwards; the resolver builds a new bundle instead of
/// editing one in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleBundle {
    pub(crate) locale_code: String,
    pub(crate) display_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) lang: Option<String>,
    pub(crate) root_path: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) sidebar: BTreeMap<String, Vec<Group>>,
    pub(crate) navbar: Vec<NavigationNode>,
    pub(crate) version_links: Vec<VersionLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) version_label: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) ui_text: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) not_found: Vec<String>,
}

impl LocaleBundle {
    /// Locale code (e.g., "zh", "en").
    #[must_use]
    pub fn locale_code(&self) -> &str {
        &self.locale_code
    }

    /// Name shown in the language picker.
    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    /// Language tag for the `lang` attribute (e.g., "zh-CN").
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// URL root of this locale (`/` for the default locale, `/en/` otherwise).
    #[must_use]
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Site title in this locale.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site description in this locale.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sidebar groups keyed by path prefix.
    #[must_use]
    pub fn sidebar(&self) -> &BTreeMap<String, Vec<Group>> {
        &self.sidebar
    }

    /// Top-level navbar entries in rendered order.
    #[must_use]
    pub fn navbar(&self) -> &[NavigationNode] {
        &self.navbar
    }

    /// Version dropdown entries.
    #[must_use]
    pub fn version_links(&self) -> &[VersionLink] {
        &self.version_links
    }

    /// Label of the version dropdown.
    #[must_use]
    pub fn version_label(&self) -> Option<&str> {
        self.version_label.as_deref()
    }

    /// Theme strings (language picker text, edit link text, ...).
    #[must_use]
    pub fn ui_text(&self) -> &BTreeMap<String, String> {
        &self.ui_text
    }

    /// Messages shown on the 404 page.
    #[must_use]
    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    /// Sidebar groups for a page, using the longest matching prefix.
    #[must_use]
    pub fn sidebar_for(&self, page_path: &str) -> Option<&[Group]> {
        self.sidebar
            .iter()
            .filter(|(prefix, _)| page_path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, groups)| groups.as_slice())
    }
}
