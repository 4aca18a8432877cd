//! Locale bundle construction.
//!
//! Turns [`LocaleDeclaration`]s into [`LocaleBundle`]s one locale at a time.
//! Every problem found here means a declaration is malformed, so loading
//! stops at the first one. Cross-locale checks happen later in
//! [`check_consistency`](crate::check_consistency).

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::bundle::{LocaleBundle, VersionLink};
use crate::declaration::{GroupDeclaration, LocaleDeclaration, NodeDeclaration};
use crate::node::{Group, Leaf, NavigationNode, NodeError};
use crate::path::{is_valid_prefix, locale_relative};

/// Error returned when a declaration cannot be turned into a bundle.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Two declarations share a locale code.
    #[error("Locale {0:?} is declared more than once")]
    DuplicateLocale(String),
    /// Sidebar key or locale root is not a `/`-delimited prefix.
    #[error("Locale {locale:?}: invalid path prefix {prefix:?} (must start and end with '/')")]
    InvalidPathPrefix {
        /// Locale code.
        locale: String,
        /// Offending prefix.
        prefix: String,
    },
    /// Two sidebar keys name the same prefix once made locale-relative.
    ///
    /// Covers a key repeated verbatim as well as `/guide/` next to
    /// `/en/guide/` in a locale rooted at `/en/`.
    #[error("Locale {locale:?}: sidebar prefix {prefix:?} duplicates {previous:?}")]
    DuplicatePathPrefix {
        /// Locale code.
        locale: String,
        /// Key declared later.
        prefix: String,
        /// Key declared first.
        previous: String,
    },
    /// A navigation entry failed node validation.
    #[error("Locale {locale:?}, {location}: {source}")]
    InvalidNode {
        /// Locale code.
        locale: String,
        /// Where the entry sits (e.g., "sidebar /guide/", "navbar").
        location: String,
        /// Node validation error.
        #[source]
        source: NodeError,
    },
    /// Site base path is not a `/`-delimited prefix.
    #[error("Invalid base path {0:?} (must start and end with '/')")]
    InvalidBasePath(String),
}

/// Bundle together with the `default` flag of its declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredBundle {
    /// Constructed bundle.
    pub bundle: LocaleBundle,
    /// Whether the declaration marked this locale as the root locale.
    pub is_default: bool,
}

/// Build one bundle per declaration, in declaration order.
///
/// # Errors
///
/// Returns [`LoadError::DuplicateLocale`] if two declarations share a code,
/// [`LoadError::InvalidPathPrefix`] for a malformed sidebar key or locale
/// root, [`LoadError::DuplicatePathPrefix`] when two sidebar keys collide,
/// and [`LoadError::InvalidNode`] for the first malformed entry.
pub fn load_bundles(declarations: &[LocaleDeclaration]) -> Result<Vec<DeclaredBundle>, LoadError> {
    let mut seen = HashSet::new();
    let mut bundles = Vec::with_capacity(declarations.len());

    for declaration in declarations {
        if !seen.insert(declaration.code.as_str()) {
            return Err(LoadError::DuplicateLocale(declaration.code.clone()));
        }
        bundles.push(DeclaredBundle {
            bundle: load_bundle(declaration)?,
            is_default: declaration.default,
        });
    }

    tracing::debug!(count = bundles.len(), "Loaded locale bundles");
    Ok(bundles)
}

fn load_bundle(declaration: &LocaleDeclaration) -> Result<LocaleBundle, LoadError> {
    let locale = &declaration.code;

    let root_path = match &declaration.path {
        Some(path) => path.clone(),
        None if declaration.default => "/".to_owned(),
        None => format!("/{locale}/"),
    };
    if !is_valid_prefix(&root_path) {
        return Err(LoadError::InvalidPathPrefix {
            locale: locale.clone(),
            prefix: root_path,
        });
    }

    let mut sidebar = BTreeMap::new();
    let mut relative_keys: HashMap<String, &str> = HashMap::new();
    for (prefix, groups) in &declaration.sidebar {
        if !is_valid_prefix(prefix) {
            return Err(LoadError::InvalidPathPrefix {
                locale: locale.clone(),
                prefix: prefix.clone(),
            });
        }
        if let Some(previous) =
            relative_keys.insert(locale_relative(prefix, &root_path), prefix.as_str())
        {
            return Err(LoadError::DuplicatePathPrefix {
                locale: locale.clone(),
                prefix: prefix.clone(),
                previous: previous.to_owned(),
            });
        }
        let groups = groups
            .iter()
            .map(build_group)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| LoadError::InvalidNode {
                locale: locale.clone(),
                location: format!("sidebar {prefix}"),
                source,
            })?;
        sidebar.insert(prefix.clone(), groups);
    }

    let navbar = declaration
        .navbar
        .iter()
        .map(build_node)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LoadError::InvalidNode {
            locale: locale.clone(),
            location: "navbar".to_owned(),
            source,
        })?;

    let version_links = declaration
        .version_links
        .iter()
        .map(|link| VersionLink {
            label: link.text.clone(),
            url: link.link.clone(),
        })
        .collect();

    Ok(LocaleBundle {
        locale_code: locale.clone(),
        display_label: declaration.label.clone().unwrap_or_else(|| locale.clone()),
        lang: declaration.lang.clone(),
        root_path,
        title: declaration.title.clone(),
        description: declaration.description.clone(),
        sidebar,
        navbar,
        version_links,
        version_label: declaration.version_label.clone(),
        ui_text: declaration.ui_text.clone(),
        not_found: declaration.not_found.clone(),
    })
}

fn build_node(declaration: &NodeDeclaration) -> Result<NavigationNode, NodeError> {
    match declaration {
        NodeDeclaration::Path(path) => Ok(Leaf::new(path.clone(), None)?.into()),
        NodeDeclaration::Link(link) => {
            Ok(Leaf::new(link.link.clone(), Some(link.text.clone()))?.into())
        }
        NodeDeclaration::Group(group) => Ok(build_group(group)?.into()),
    }
}

fn build_group(declaration: &GroupDeclaration) -> Result<Group, NodeError> {
    let children = declaration
        .children
        .iter()
        .map(build_node)
        .collect::<Result<Vec<_>, _>>()?;
    Group::new(declaration.text.clone(), declaration.collapsible, children)
}
