//! Collected configuration problems.
//!
//! Unlike [`LoadError`](crate::LoadError), diagnostics do not stop a run.
//! The validator and resolver push every problem they find so one compile
//! reports all of them.

use std::fmt;

use serde::Serialize;

/// How serious a diagnostic is. Only errors block emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, but the artifact is still emitted.
    Warning,
    /// Emission is blocked.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Category of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Locale tree shape differs from the default locale.
    StructuralMismatch,
    /// Leaf path has no matching content page.
    DanglingPageReference,
    /// Version link URL or label is malformed.
    InvalidLink,
    /// Theme string or 404 message missing compared to the default locale.
    UntranslatedText,
    /// Version label uses `{version}` but no version is configured.
    UnresolvedVersion,
}

impl DiagnosticKind {
    /// Stable name used in console output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StructuralMismatch => "StructuralMismatch",
            Self::DanglingPageReference => "DanglingPageReference",
            Self::InvalidLink => "InvalidLink",
            Self::UntranslatedText => "UntranslatedText",
            Self::UnresolvedVersion => "UnresolvedVersion",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configuration problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Problem category.
    pub kind: DiagnosticKind,
    /// Whether the problem blocks emission.
    pub severity: Severity,
    /// Locale the problem was found in.
    pub locale: String,
    /// Offending path, prefix or label.
    ///
    /// Sidebar prefixes are given locale-relative (`/guide/`, not
    /// `/en/guide/`) so the same prefix reads the same in every locale.
    /// Page paths and link labels are given as declared.
    pub subject: String,
    /// Human-readable explanation.
    pub detail: String,
}

impl Diagnostic {
    fn new(
        kind: DiagnosticKind,
        severity: Severity,
        locale: &str,
        subject: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            locale: locale.to_owned(),
            subject: subject.into(),
            detail: detail.into(),
        }
    }

    /// Tree shape differs from the default locale under `prefix`.
    #[must_use]
    pub fn structural_mismatch(
        locale: &str,
        prefix: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            DiagnosticKind::StructuralMismatch,
            Severity::Error,
            locale,
            prefix,
            detail,
        )
    }

    /// Leaf path does not match any known content page.
    #[must_use]
    pub fn dangling_page_reference(locale: &str, path: &str) -> Self {
        Self::new(
            DiagnosticKind::DanglingPageReference,
            Severity::Error,
            locale,
            path,
            format!("no content page found for {path}"),
        )
    }

    /// Version link is malformed.
    #[must_use]
    pub fn invalid_link(locale: &str, label: &str, url: &str, reason: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidLink,
            Severity::Error,
            locale,
            label,
            format!("{url:?}: {reason}"),
        )
    }

    /// Text present in the default locale is missing here.
    #[must_use]
    pub fn untranslated_text(locale: &str, key: &str, detail: impl Into<String>) -> Self {
        Self::new(
            DiagnosticKind::UntranslatedText,
            Severity::Warning,
            locale,
            key,
            detail,
        )
    }

    /// Version placeholder cannot be filled in.
    #[must_use]
    pub fn unresolved_version(locale: &str, label: &str) -> Self {
        Self::new(
            DiagnosticKind::UnresolvedVersion,
            Severity::Warning,
            locale,
            label,
            "label uses {version} but no site version is configured",
        )
    }

    /// Replace the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether this diagnostic blocks emission.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[StructuralMismatch] en /guide/: expected 2 groups, found 1"
        write!(
            f,
            "{}[{}] {} {}: {}",
            self.severity, self.kind, self.locale, self.subject, self.detail
        )
    }
}
