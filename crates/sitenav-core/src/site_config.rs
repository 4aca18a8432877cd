//! Compiled site navigation artifact.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bundle::LocaleBundle;

/// Validated, resolved navigation for every locale of a site.
///
/// Produced only by [`Compiler::compile`](crate::Compiler::compile) and
/// read-only afterwards. `default_locale` is always a key of `locales`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    locales: BTreeMap<String, LocaleBundle>,
    default_locale: String,
    base_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo: Option<String>,
}

impl SiteConfig {
    pub(crate) fn new(
        locales: BTreeMap<String, LocaleBundle>,
        default_locale: String,
        base_path: String,
        repo: Option<String>,
    ) -> Self {
        debug_assert!(locales.contains_key(&default_locale));
        Self {
            locales,
            default_locale,
            base_path,
            repo,
        }
    }

    /// Bundles keyed by locale code.
    #[must_use]
    pub fn locales(&self) -> &BTreeMap<String, LocaleBundle> {
        &self.locales
    }

    /// Code of the root locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// URL path the site is served under (e.g., "/docs/").
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Source repository URL, if configured.
    #[must_use]
    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    /// Bundle for a locale code.
    #[must_use]
    pub fn locale(&self, code: &str) -> Option<&LocaleBundle> {
        self.locales.get(code)
    }

    /// Bundle of the root locale.
    #[must_use]
    pub fn default_bundle(&self) -> &LocaleBundle {
        &self.locales[&self.default_locale]
    }

    /// Public URL of a root-relative page path.
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use sitenav_core::{CompileOptions, Compiler, ContentIndex, Declarations};
    ///
    /// let declarations = Declarations::from_yaml(
    ///     "locales:\n  - { code: en, default: true, title: Docs, navbar: [/guide/install] }\n",
    /// )?;
    /// let content: ContentIndex = ["/guide/install.md"].into_iter().collect();
    /// let compiler = Compiler::new(CompileOptions {
    ///     base_path: "/dify-spring-boot-starter/".to_owned(),
    ///     ..CompileOptions::default()
    /// });
    /// let site = compiler.compile(&declarations.locales, &content)?.site;
    ///
    /// assert_eq!(site.href("/guide/install"), "/dify-spring-boot-starter/guide/install");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Serialize as pretty-printed JSON for the renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
