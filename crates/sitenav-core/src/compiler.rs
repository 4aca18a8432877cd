//! Navigation compiler.
//!
//! Runs the whole pipeline on one set of declarations:
//!
//! 1. [`load_bundles`] builds one bundle per locale (fails fast)
//! 2. the single locale flagged `default` is selected (fails fast)
//! 3. [`check_consistency`] compares every locale with the default one
//! 4. [`PathResolver`] checks leaves and version links, and the site
//!    repository link is checked
//! 5. if no error-severity diagnostic was collected, a [`SiteConfig`] is emitted
//!
//! Steps 3 and 4 collect diagnostics instead of failing, so a single run
//! reports every structural and reference problem. Emission is
//! all-or-nothing.

use std::collections::BTreeMap;

use crate::content::ContentIndex;
use crate::declaration::LocaleDeclaration;
use crate::diagnostic::Diagnostic;
use crate::loader::{DeclaredBundle, LoadError, load_bundles};
use crate::path::is_valid_prefix;
use crate::resolver::{PathResolver, check_link_url};
use crate::site_config::SiteConfig;
use crate::validator::check_consistency;

/// Error returned when compilation produces no artifact.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A declaration is malformed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// No locale is flagged as default.
    #[error("No locale is flagged as default")]
    NoDefaultLocale,
    /// More than one locale is flagged as default.
    #[error("More than one locale is flagged as default: {}", .locales.join(", "))]
    AmbiguousDefaultLocale {
        /// Codes of every flagged locale, in declaration order.
        locales: Vec<String>,
    },
    /// Validation or resolution found at least one error.
    ///
    /// Carries every diagnostic of the run, warnings included.
    #[error("Navigation check failed with {} error(s)", error_count(.0))]
    ValidationFailed(Vec<Diagnostic>),
}

fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Options for a compile run.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// URL path the site is served under. Must start and end with `/`.
    pub base_path: String,
    /// Site version substituted into `{version}` labels.
    pub version: Option<String>,
    /// Treat cross-locale structural differences as errors.
    pub strict: bool,
    /// Source repository URL shown in the navbar and used by edit links.
    pub repo: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            base_path: "/".to_owned(),
            version: None,
            strict: true,
            repo: None,
        }
    }
}

/// Successful compile result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compilation {
    /// Emitted artifact.
    pub site: SiteConfig,
    /// Warnings collected during the run.
    pub warnings: Vec<Diagnostic>,
}

/// Compiles locale declarations into a [`SiteConfig`].
///
/// Holds no state between runs; the same compiler can be reused or shared
/// across threads.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a compiler with the given options.
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile declarations against a content snapshot.
    ///
    /// # Errors
    ///
    /// - [`CompileError::Load`] for malformed declarations or base path
    /// - [`CompileError::NoDefaultLocale`] / [`CompileError::AmbiguousDefaultLocale`]
    ///   unless exactly one locale is flagged `default`
    /// - [`CompileError::ValidationFailed`] with the full diagnostic list if
    ///   any error-severity diagnostic was collected
    pub fn compile(
        &self,
        declarations: &[LocaleDeclaration],
        content: &ContentIndex,
    ) -> Result<Compilation, CompileError> {
        if !is_valid_prefix(&self.options.base_path) {
            return Err(LoadError::InvalidBasePath(self.options.base_path.clone()).into());
        }

        let declared = load_bundles(declarations)?;
        let reference = select_default_locale(&declared)?;
        let bundles: Vec<_> = declared.into_iter().map(|d| d.bundle).collect();
        let default_locale = bundles[reference].locale_code.clone();

        let mut diagnostics =
            check_consistency(&bundles[reference], &bundles, self.options.strict);

        if let Some(repo) = &self.options.repo
            && let Err(reason) = check_link_url(repo)
        {
            diagnostics.push(Diagnostic::invalid_link(&default_locale, "repo", repo, reason));
        }

        let resolver = PathResolver::new(content, self.options.version.as_deref());
        let mut locales = BTreeMap::new();
        for bundle in bundles {
            let (resolved, found) = resolver.resolve(bundle);
            diagnostics.extend(found);
            locales.insert(resolved.locale_code.clone(), resolved);
        }

        if diagnostics.iter().any(Diagnostic::is_error) {
            tracing::debug!(
                errors = error_count(&diagnostics),
                total = diagnostics.len(),
                "Compilation failed"
            );
            return Err(CompileError::ValidationFailed(diagnostics));
        }

        tracing::info!(
            locales = locales.len(),
            default = %default_locale,
            warnings = diagnostics.len(),
            "Compiled site navigation"
        );

        Ok(Compilation {
            site: SiteConfig::new(
                locales,
                default_locale,
                self.options.base_path.clone(),
                self.options.repo.clone(),
            ),
            warnings: diagnostics,
        })
    }
}

/// Pick the single locale flagged as default, returning its index.
fn select_default_locale(declared: &[DeclaredBundle]) -> Result<usize, CompileError> {
    let flagged: Vec<usize> = declared
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_default)
        .map(|(index, _)| index)
        .collect();

    match flagged.as_slice() {
        [] => Err(CompileError::NoDefaultLocale),
        [index] => Ok(*index),
        _ => Err(CompileError::AmbiguousDefaultLocale {
            locales: flagged
                .iter()
                .map(|&index| declared[index].bundle.locale_code.clone())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::declaration::Declarations;
    use crate::diagnostic::{DiagnosticKind, Severity};
    use crate::node::NavigationNode;

    /// Bilingual site modelled on a real VuePress configuration.
    const SITE: &str = r"
locales:
  - code: zh
    default: true
    lang: zh-CN
    label: 简体中文
    title: dify-spring-boot-starter
    description: dify springboot 实现
    version_label: v{version}
    ui_text:
      select_language_text: 选择语言
      edit_link_text: 在 GitHub 上编辑此页
      last_updated_text: 上次更新
    not_found: [这里什么都没有, 我们怎么到这来了？]
    sidebar:
      /guide/:
        - text: 指南
          collapsible: true
          children:
            - /guide/introduction
            - /guide/getting-started
            - /guide/install
        - text: 功能
          collapsible: true
          children:
            - /guide/feature/chat
            - /guide/feature/workflow
      /config/:
        - text: 配置
          children: [/config/introduction, /config/custom]
    navbar:
      - text: 指南
        children:
          - /guide/introduction
          - /guide/getting-started
          - /guide/install
          - text: 功能
            children: [/guide/feature/chat, /guide/feature/workflow]
      - text: 配置
        children: [/config/introduction, /config/custom]
    version_links:
      - { text: v1.x-SNAPSHOT, link: 'https://example.github.io/doc/v1.x-SNAPSHOT/' }
      - { text: 更新日志, link: 'https://github.com/example/releases' }
  - code: en
    lang: en-US
    label: English
    title: dify-spring-boot-starter
    description: dify springboot realization
    version_label: v{version}
    ui_text:
      select_language_text: Languages
      edit_link_text: Edit this page on GitHub
      last_updated_text: Last Updated
    not_found: [There's nothing here, How did we get here?]
    sidebar:
      /en/guide/:
        - text: Guide
          collapsible: true
          children:
            - /en/guide/introduction
            - /en/guide/getting-started
            - /en/guide/install
        - text: Features
          collapsible: true
          children:
            - /en/guide/feature/chat
            - /en/guide/feature/workflow
      /en/config/:
        - text: Config
          children: [/en/config/introduction, /en/config/custom]
    navbar:
      - text: Guide
        children:
          - /en/guide/introduction
          - /en/guide/getting-started
          - /en/guide/install
          - text: Features
            children: [/en/guide/feature/chat, /en/guide/feature/workflow]
      - text: Config
        children: [/en/config/introduction, /en/config/custom]
    version_links:
      - { text: v1.x-SNAPSHOT, link: 'https://example.github.io/doc/v1.x-SNAPSHOT/' }
      - { text: Changelog, link: 'https://github.com/example/releases' }
";

    const PAGES: &[&str] = &[
        "/guide/introduction.md",
        "/guide/getting-started.md",
        "/guide/install.md",
        "/guide/feature/chat.md",
        "/guide/feature/workflow.md",
        "/config/introduction.md",
        "/config/custom.md",
        "/en/guide/introduction.md",
        "/en/guide/getting-started.md",
        "/en/guide/install.md",
        "/en/guide/feature/chat.md",
        "/en/guide/feature/workflow.md",
        "/en/config/introduction.md",
        "/en/config/custom.md",
    ];

    fn declarations(yaml: &str) -> Vec<LocaleDeclaration> {
        Declarations::from_yaml(yaml).unwrap().locales
    }

    fn content() -> ContentIndex {
        PAGES.iter().collect()
    }

    fn compiler() -> Compiler {
        Compiler::new(CompileOptions {
            base_path: "/dify-spring-boot-starter/".to_owned(),
            version: Some("1.6.0".to_owned()),
            strict: true,
            repo: Some("https://github.com/guoshiqiufeng/dify-spring-boot-starter".to_owned()),
        })
    }

    fn diagnostics_of(result: Result<Compilation, CompileError>) -> Vec<Diagnostic> {
        match result {
            Err(CompileError::ValidationFailed(diagnostics)) => diagnostics,
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_bilingual_site() {
        let compilation = compiler().compile(&declarations(SITE), &content()).unwrap();
        let site = &compilation.site;

        assert!(compilation.warnings.is_empty());
        assert_eq!(site.default_locale(), "zh");
        assert_eq!(site.base_path(), "/dify-spring-boot-starter/");
        assert_eq!(
            site.locales().keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["en", "zh"]
        );

        let zh = site.default_bundle();
        assert_eq!(zh.display_label(), "简体中文");
        assert_eq!(zh.version_label(), Some("v1.6.0"));
        assert_eq!(zh.sidebar()["/guide/"].len(), 2);

        let en = site.locale("en").unwrap();
        assert_eq!(en.root_path(), "/en/");
        let groups = en.sidebar_for("/en/guide/feature/chat").unwrap();
        assert_eq!(groups[1].label(), "Features");
        assert!(matches!(en.navbar()[0], NavigationNode::Group(_)));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let decls = declarations(SITE);
        let content = content();

        let first = compiler().compile(&decls, &content).unwrap();
        let second = compiler().compile(&decls, &content).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.site.to_json().unwrap(), second.site.to_json().unwrap());
    }

    #[test]
    fn test_compile_minimal_example() {
        let decls = declarations(
            r"
locales:
  - code: zh
    default: true
    title: 文档
    sidebar:
      /guide/:
        - { text: 指南, children: [/guide/intro] }
  - code: en
    title: Docs
    sidebar:
      /guide/:
        - { text: Guide, children: [/en/guide/intro] }
",
        );
        let content: ContentIndex = ["/guide/intro", "/en/guide/intro"].into_iter().collect();

        let compilation = Compiler::default().compile(&decls, &content).unwrap();

        assert_eq!(compilation.site.default_locale(), "zh");
        assert_eq!(compilation.site.base_path(), "/");
    }

    #[test]
    fn test_compile_renamed_prefix_fails_with_one_mismatch() {
        let decls = declarations(
            r"
locales:
  - code: zh
    default: true
    title: 文档
    sidebar:
      /guide/:
        - { text: 指南, children: [/guide/intro] }
  - code: en
    title: Docs
    sidebar:
      /guides/:
        - { text: Guide, children: [/en/guide/intro] }
",
        );
        let content: ContentIndex = ["/guide/intro", "/en/guide/intro"].into_iter().collect();

        let diagnostics = diagnostics_of(Compiler::default().compile(&decls, &content));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralMismatch);
        assert_eq!(diagnostics[0].locale, "en");
    }

    #[test]
    fn test_compile_collects_mismatches_and_dangling_together() {
        let yaml = SITE.replace(
            "        - text: Features\n          collapsible: true\n          children:\n            - /en/guide/feature/chat\n            - /en/guide/feature/workflow\n",
            "",
        );
        let content: ContentIndex = PAGES
            .iter()
            .filter(|p| !p.starts_with("/config/"))
            .collect();

        let diagnostics = diagnostics_of(compiler().compile(&declarations(&yaml), &content));

        let mismatches: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::StructuralMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].locale, "en");
        assert_eq!(mismatches[0].subject, "/guide/");

        let dangling: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::DanglingPageReference)
            .map(|d| (d.locale.as_str(), d.subject.as_str()))
            .collect();
        assert_eq!(
            dangling,
            vec![("zh", "/config/introduction"), ("zh", "/config/custom")]
        );
    }

    #[test]
    fn test_compile_non_strict_emits_with_warnings() {
        let yaml = SITE.replace(
            "        - text: Features\n          collapsible: true\n          children:\n            - /en/guide/feature/chat\n            - /en/guide/feature/workflow\n",
            "",
        );
        let compiler = Compiler::new(CompileOptions {
            strict: false,
            version: Some("1.6.0".to_owned()),
            ..CompileOptions::default()
        });

        let compilation = compiler.compile(&declarations(&yaml), &content()).unwrap();

        assert_eq!(compilation.warnings.len(), 1);
        assert_eq!(compilation.warnings[0].severity, Severity::Warning);
        assert_eq!(compilation.warnings[0].kind, DiagnosticKind::StructuralMismatch);
    }

    #[test]
    fn test_compile_no_default_locale() {
        let decls = declarations("locales:\n  - { code: en, title: Docs }\n");
        let err = Compiler::default()
            .compile(&decls, &ContentIndex::new())
            .unwrap_err();
        assert!(matches!(err, CompileError::NoDefaultLocale));
    }

    #[test]
    fn test_compile_ambiguous_default_locale() {
        let decls = declarations(
            "locales:\n  - { code: zh, default: true, title: Docs }\n  - { code: en, default: true, title: Docs }\n",
        );
        let err = Compiler::default()
            .compile(&decls, &ContentIndex::new())
            .unwrap_err();

        let CompileError::AmbiguousDefaultLocale { locales } = err else {
            panic!("expected AmbiguousDefaultLocale");
        };
        assert_eq!(locales, vec!["zh", "en"]);
    }

    #[test]
    fn test_compile_construction_error_is_fail_fast() {
        let decls = declarations(
            "locales:\n  - { code: en, default: true, title: Docs }\n  - { code: en, title: Docs }\n",
        );
        let err = Compiler::default()
            .compile(&decls, &ContentIndex::new())
            .unwrap_err();
        assert!(matches!(err, CompileError::Load(LoadError::DuplicateLocale(_))));
    }

    #[test]
    fn test_compile_invalid_base_path() {
        let compiler = Compiler::new(CompileOptions {
            base_path: "docs".to_owned(),
            ..CompileOptions::default()
        });
        let err = compiler
            .compile(&declarations(SITE), &content())
            .unwrap_err();
        assert!(matches!(err, CompileError::Load(LoadError::InvalidBasePath(_))));
    }

    #[test]
    fn test_href_joins_base_path() {
        let compilation = compiler().compile(&declarations(SITE), &content()).unwrap();

        assert_eq!(
            compilation.site.href("/guide/install"),
            "/dify-spring-boot-starter/guide/install"
        );
        assert_eq!(compilation.site.href("/"), "/dify-spring-boot-starter/");
    }

    #[test]
    fn test_to_json_shape() {
        let compilation = compiler().compile(&declarations(SITE), &content()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&compilation.site.to_json().unwrap()).unwrap();

        assert_eq!(json["defaultLocale"], "zh");
        assert_eq!(json["basePath"], "/dify-spring-boot-starter/");
        assert_eq!(json["locales"]["en"]["displayLabel"], "English");
        assert_eq!(json["locales"]["en"]["versionLabel"], "v1.6.0");
        assert_eq!(
            json["locales"]["zh"]["sidebar"]["/config/"][0]["children"][0]["path"],
            "/config/introduction"
        );
    }

    #[test]
    fn test_validation_failed_message_counts_errors() {
        let err = CompileError::ValidationFailed(vec![
            Diagnostic::dangling_page_reference("en", "/a"),
            Diagnostic::untranslated_text("en", "edit_link_text", "missing"),
        ]);
        assert_eq!(err.to_string(), "Navigation check failed with 1 error(s)");
    }

    #[test]
    fn test_compile_emits_repo_link() {
        let compilation = compiler().compile(&declarations(SITE), &content()).unwrap();

        assert_eq!(
            compilation.site.repo(),
            Some("https://github.com/guoshiqiufeng/dify-spring-boot-starter")
        );
        let json: serde_json::Value =
            serde_json::from_str(&compilation.site.to_json().unwrap()).unwrap();
        assert_eq!(
            json["repo"],
            "https://github.com/guoshiqiufeng/dify-spring-boot-starter"
        );
    }

    #[test]
    fn test_compile_without_repo_omits_field() {
        let compilation = Compiler::new(CompileOptions {
            version: Some("1.6.0".to_owned()),
            ..CompileOptions::default()
        })
        .compile(&declarations(SITE), &content())
        .unwrap();

        assert_eq!(compilation.site.repo(), None);
        let json: serde_json::Value =
            serde_json::from_str(&compilation.site.to_json().unwrap()).unwrap();
        assert!(json.get("repo").is_none());
    }

    #[test]
    fn test_compile_invalid_repo_link() {
        let compiler = Compiler::new(CompileOptions {
            version: Some("1.6.0".to_owned()),
            repo: Some("git@github.com:example/docs.git".to_owned()),
            ..CompileOptions::default()
        });

        let diagnostics = diagnostics_of(compiler.compile(&declarations(SITE), &content()));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidLink);
        assert_eq!(diagnostics[0].locale, "zh");
        assert_eq!(diagnostics[0].subject, "repo");
    }

    #[test]
    fn test_compile_rooted_and_bare_prefix_fails_fast() {
        let yaml = SITE.replace(
            "      /en/config/:\n",
            "      /guide/:\n        - text: Extra\n          children: [/en/guide/install]\n      /en/config/:\n",
        );

        let err = compiler()
            .compile(&declarations(&yaml), &content())
            .unwrap_err();

        assert!(matches!(
            err,
            CompileError::Load(LoadError::DuplicatePathPrefix { ref locale, .. }) if locale == "en"
        ));
    }

    #[test]
    fn test_select_default_locale_returns_index() {
        let declared = load_bundles(&declarations(SITE)).unwrap();
        assert_eq!(select_default_locale(&declared).unwrap(), 0);
    }
}
