//! Leaf and link resolution.
//!
//! Leaf paths are checked against the [`ContentIndex`] supplied by the
//! content scanner. Version links are checked syntactically against a
//! scheme allow-list; nothing is fetched.

use std::collections::HashSet;

use crate::bundle::LocaleBundle;
use crate::content::ContentIndex;
use crate::diagnostic::Diagnostic;
use crate::path::normalize_page_path;

/// Placeholder replaced with the site version in version labels.
const VERSION_PLACEHOLDER: &str = "{version}";

/// Resolves bundle references against a content snapshot.
pub struct PathResolver<'a> {
    content: &'a ContentIndex,
    version: Option<&'a str>,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver for one compile run.
    ///
    /// # Arguments
    ///
    /// * `content` - Known content paths
    /// * `version` - Site version substituted into `{version}` labels
    #[must_use]
    pub fn new(content: &'a ContentIndex, version: Option<&'a str>) -> Self {
        Self { content, version }
    }

    /// Resolve one bundle.
    ///
    /// Returns the resolved bundle (version label filled in) together with
    /// every problem found. Each missing page is reported once per locale,
    /// however many times it is referenced.
    #[must_use]
    pub fn resolve(&self, bundle: LocaleBundle) -> (LocaleBundle, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        self.check_leaves(&bundle, &mut diagnostics);
        check_version_links(&bundle, &mut diagnostics);

        let version_label = bundle
            .version_label
            .as_deref()
            .map(|label| self.resolve_version_label(&bundle.locale_code, label, &mut diagnostics));

        tracing::debug!(
            locale = %bundle.locale_code,
            found = diagnostics.len(),
            "Resolved locale references"
        );

        let resolved = LocaleBundle {
            version_label,
            ..bundle
        };
        (resolved, diagnostics)
    }

    fn check_leaves(&self, bundle: &LocaleBundle, diagnostics: &mut Vec<Diagnostic>) {
        let mut reported = HashSet::new();
        let mut check = |path: &str| {
            let normalized = normalize_page_path(path);
            if !self.content.contains_normalized(&normalized) && reported.insert(normalized) {
                diagnostics.push(Diagnostic::dangling_page_reference(
                    &bundle.locale_code,
                    path,
                ));
            }
        };

        for group in bundle.sidebar.values().flatten() {
            group.for_each_leaf(&mut |leaf| check(leaf.path()));
        }
        for node in &bundle.navbar {
            node.for_each_leaf(&mut |leaf| check(leaf.path()));
        }
    }

    fn resolve_version_label(
        &self,
        locale: &str,
        label: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        if !label.contains(VERSION_PLACEHOLDER) {
            return label.to_owned();
        }
        match self.version {
            Some(version) => label.replace(VERSION_PLACEHOLDER, version),
            None => {
                diagnostics.push(Diagnostic::unresolved_version(locale, label));
                label.to_owned()
            }
        }
    }
}

fn check_version_links(bundle: &LocaleBundle, diagnostics: &mut Vec<Diagnostic>) {
    for link in &bundle.version_links {
        let result = if link.label.trim().is_empty() {
            Err("label is empty")
        } else {
            check_link_url(&link.url)
        };
        if let Err(reason) = result {
            diagnostics.push(Diagnostic::invalid_link(
                &bundle.locale_code,
                &link.label,
                &link.url,
                reason,
            ));
        }
    }
}

/// Check a link URL against the allow-list.
///
/// Accepted: `http://` and `https://` URLs with a host, and relative URLs
/// without a scheme. Protocol-relative URLs (`//host`) are rejected.
pub(crate) fn check_link_url(url: &str) -> Result<(), &'static str> {
    if url.is_empty() {
        return Err("URL is empty");
    }
    if url.chars().any(char::is_whitespace) {
        return Err("URL contains whitespace");
    }

    for scheme in ["https://", "http://"] {
        if url
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
        {
            let host = url[scheme.len()..]
                .split(['/', '?', '#'])
                .next()
                .unwrap_or_default();
            return if host.is_empty() {
                Err("URL has no host")
            } else {
                Ok(())
            };
        }
    }

    if url.starts_with("//") {
        return Err("protocol-relative URLs are not allowed");
    }

    match url.find(':') {
        Some(colon) if !url[..colon].contains(['/', '?', '#']) => {
            Err("only https:, http: and relative URLs are allowed")
        }
        _ => Ok(()),
    }
}
