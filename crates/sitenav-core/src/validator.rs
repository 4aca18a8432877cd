//! Cross-locale structural parity checks.
//!
//! Every non-default bundle is walked in lockstep with the default bundle.
//! Labels and leaf paths may differ between locales; sidebar prefixes,
//! group counts, child counts, node kinds and collapsibility may not.
//!
//! Sidebar prefixes are compared locale-relative (`/en/guide/` under root
//! `/en/` is `/guide/`), and diagnostics name them in that form.
//!
//! The walk never stops early. When two sequences differ in length the
//! mismatch is reported once and that sequence is not descended into, so a
//! single missing group yields a single diagnostic.

use std::collections::BTreeMap;

use crate::bundle::LocaleBundle;
use crate::diagnostic::{Diagnostic, Severity};
use crate::node::{Group, NavigationNode};
use crate::path::locale_relative;

/// Compare every bundle against `reference` and collect all differences.
///
/// The reference bundle itself (matched by locale code) is skipped. With
/// `strict` unset, structural mismatches are reported as warnings.
pub fn check_consistency<'a>(
    reference: &LocaleBundle,
    bundles: impl IntoIterator<Item = &'a LocaleBundle>,
    strict: bool,
) -> Vec<Diagnostic> {
    let severity = if strict {
        Severity::Error
    } else {
        Severity::Warning
    };

    let mut diagnostics = Vec::new();
    for bundle in bundles {
        if bundle.locale_code == reference.locale_code {
            continue;
        }
        let mut walk = LockstepWalk {
            locale: &bundle.locale_code,
            reference_locale: &reference.locale_code,
            severity,
            diagnostics: &mut diagnostics,
        };
        walk.compare_sidebar(reference, bundle);
        walk.compare_navbar(reference, bundle);
        walk.compare_text(reference, bundle);
    }

    tracing::debug!(
        reference = %reference.locale_code,
        found = diagnostics.len(),
        "Checked locale consistency"
    );
    diagnostics
}

struct LockstepWalk<'a> {
    locale: &'a str,
    reference_locale: &'a str,
    severity: Severity,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl LockstepWalk<'_> {
    fn mismatch(&mut self, subject: &str, detail: String) {
        self.diagnostics.push(
            Diagnostic::structural_mismatch(self.locale, subject, detail)
                .with_severity(self.severity),
        );
    }

    fn compare_sidebar(&mut self, reference: &LocaleBundle, candidate: &LocaleBundle) {
        let expected = relative_sidebar(reference);
        let actual = relative_sidebar(candidate);

        let missing: Vec<&str> = expected
            .keys()
            .filter(|key| !actual.contains_key(*key))
            .map(String::as_str)
            .collect();
        let unexpected: Vec<&str> = actual
            .keys()
            .filter(|key| !expected.contains_key(*key))
            .map(String::as_str)
            .collect();

        if let Some(subject) = missing.first().or(unexpected.first()) {
            let detail = format!(
                "sidebar prefixes differ from {}: missing [{}], unexpected [{}]",
                self.reference_locale,
                missing.join(", "),
                unexpected.join(", ")
            );
            self.mismatch(subject, detail);
        }

        for (key, expected_groups) in &expected {
            if let Some(actual_groups) = actual.get(key) {
                self.compare_groups(key, expected_groups, actual_groups);
            }
        }
    }

    fn compare_groups(&mut self, prefix: &str, expected: &[Group], actual: &[Group]) {
        if expected.len() != actual.len() {
            self.mismatch(
                prefix,
                format!(
                    "expected {} groups, found {}",
                    expected.len(),
                    actual.len()
                ),
            );
            return;
        }
        for (expected, actual) in expected.iter().zip(actual) {
            let trail = format!("group {:?}", actual.label());
            self.compare_group(prefix, &trail, expected, actual);
        }
    }

    fn compare_group(&mut self, prefix: &str, trail: &str, expected: &Group, actual: &Group) {
        if expected.collapsible() != actual.collapsible() {
            self.mismatch(
                prefix,
                format!(
                    "{trail}: collapsible is {} in {}, {} here",
                    expected.collapsible(),
                    self.reference_locale,
                    actual.collapsible()
                ),
            );
        }
        self.compare_nodes(prefix, trail, expected.children(), actual.children());
    }

    fn compare_nodes(
        &mut self,
        prefix: &str,
        trail: &str,
        expected: &[NavigationNode],
        actual: &[NavigationNode],
    ) {
        if expected.len() != actual.len() {
            self.mismatch(
                prefix,
                format!(
                    "{trail}: expected {} entries, found {}",
                    expected.len(),
                    actual.len()
                ),
            );
            return;
        }

        for (position, (expected, actual)) in expected.iter().zip(actual).enumerate() {
            match (expected, actual) {
                (NavigationNode::Leaf(_), NavigationNode::Leaf(_)) => {}
                (NavigationNode::Group(expected), NavigationNode::Group(actual)) => {
                    let trail = format!("{trail} > {:?}", actual.label());
                    self.compare_group(prefix, &trail, expected, actual);
                }
                _ => self.mismatch(
                    prefix,
                    format!(
                        "{trail}: entry {} is a {} in {}, a {} here",
                        position + 1,
                        expected.kind(),
                        self.reference_locale,
                        actual.kind()
                    ),
                ),
            }
        }
    }

    fn compare_navbar(&mut self, reference: &LocaleBundle, candidate: &LocaleBundle) {
        self.compare_nodes("navbar", "navbar", &reference.navbar, &candidate.navbar);
    }

    fn compare_text(&mut self, reference: &LocaleBundle, candidate: &LocaleBundle) {
        for key in reference.ui_text.keys() {
            if !candidate.ui_text.contains_key(key) {
                self.diagnostics.push(Diagnostic::untranslated_text(
                    self.locale,
                    key,
                    format!("defined in {} but missing here", self.reference_locale),
                ));
            }
        }
        if reference.not_found.len() != candidate.not_found.len() {
            self.diagnostics.push(Diagnostic::untranslated_text(
                self.locale,
                "not_found",
                format!(
                    "{} has {} messages, found {}",
                    self.reference_locale,
                    reference.not_found.len(),
                    candidate.not_found.len()
                ),
            ));
        }
    }
}

/// Sidebar keyed by locale-relative prefix.
///
/// The loader rejects keys that collide once made relative, so no entry is
/// lost here.
fn relative_sidebar(bundle: &LocaleBundle) -> BTreeMap<String, &[Group]> {
    bundle
        .sidebar
        .iter()
        .map(|(key, groups)| (locale_relative(key, &bundle.root_path), groups.as_slice()))
        .collect()
}
