//! Raw locale declarations as written by documentation authors.
//!
//! Declarations are plain serde structures with no validation beyond what
//! the file format enforces. [`load_bundles`](crate::load_bundles) turns
//! them into validated [`LocaleBundle`](crate::LocaleBundle) values.
//!
//! # File Format
//!
//! ```yaml
//! locales:
//!   - code: zh
//!     default: true
//!     label: 简体中文
//!     title: dify-spring-boot-starter
//!     sidebar:
//!       /guide/:
//!         - text: 指南
//!           collapsible: true
//!           children: [/guide/introduction, /guide/install]
//!     navbar:
//!       - { text: 指南, link: /guide/introduction }
//! ```
//!
//! A navigation entry is a bare path string, a `{ text, link }` object or a
//! `{ text, collapsible, children }` group.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Error returned when a declarations file cannot be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    /// I/O error reading the file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is neither YAML nor JSON.
    #[error("Unsupported declarations format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Top-level declarations document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Declarations {
    /// One entry per locale, in declaration order.
    pub locales: Vec<LocaleDeclaration>,
}

impl Declarations {
    /// Parse declarations from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, DeclarationError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse declarations from JSON content.
    pub fn from_json(content: &str) -> Result<Self, DeclarationError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load declarations from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !matches!(extension.as_str(), "yaml" | "yml" | "json") {
            return Err(DeclarationError::UnsupportedFormat(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| DeclarationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if extension == "json" {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }
}

/// Navigation and text definition for one locale, as declared.
#[derive(Clone, Debug, Deserialize)]
pub struct LocaleDeclaration {
    /// Locale code, unique across the document.
    pub code: String,
    /// Marks the root locale. Exactly one locale must set this.
    #[serde(default)]
    pub default: bool,
    /// Language tag (e.g., "en-US").
    #[serde(default)]
    pub lang: Option<String>,
    /// Name in the language picker. Defaults to the locale code.
    #[serde(default)]
    pub label: Option<String>,
    /// Locale URL root. Defaults to `/` for the default locale and
    /// `/<code>/` otherwise.
    #[serde(default)]
    pub path: Option<String>,
    /// Site title.
    pub title: String,
    /// Site description.
    #[serde(default)]
    pub description: String,
    /// Sidebar groups keyed by path prefix, in declaration order.
    ///
    /// Kept as a list so that a repeated key reaches the loader instead of
    /// replacing the earlier entry.
    #[serde(default, deserialize_with = "map_entries")]
    pub sidebar: Vec<(String, Vec<GroupDeclaration>)>,
    /// Navbar entries.
    #[serde(default)]
    pub navbar: Vec<NodeDeclaration>,
    /// Version dropdown entries.
    #[serde(default)]
    pub version_links: Vec<LinkDeclaration>,
    /// Label of the version dropdown; `{version}` is replaced with the
    /// configured site version.
    #[serde(default)]
    pub version_label: Option<String>,
    /// Theme strings.
    #[serde(default)]
    pub ui_text: BTreeMap<String, String>,
    /// 404 page messages.
    #[serde(default)]
    pub not_found: Vec<String>,
}

/// Navigation entry as declared.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeDeclaration {
    /// Bare page path.
    Path(String),
    /// Group with children.
    Group(GroupDeclaration),
    /// Page with an explicit label.
    Link(LinkDeclaration),
}

/// Group entry as declared.
#[derive(Clone, Debug, Deserialize)]
pub struct GroupDeclaration {
    /// Group label.
    pub text: String,
    /// Whether the group can be collapsed.
    #[serde(default)]
    pub collapsible: bool,
    /// Child entries in rendered order.
    pub children: Vec<NodeDeclaration>,
}

/// Labelled link as declared.
#[derive(Clone, Debug, Deserialize)]
pub struct LinkDeclaration {
    /// Display label.
    pub text: String,
    /// Target path or URL.
    pub link: String,
}

/// Deserialize a map into its entries, duplicates included.
fn map_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by path prefix")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}
