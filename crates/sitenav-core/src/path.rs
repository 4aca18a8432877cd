//! Root-relative path checks and normalisation.
//!
//! Page paths (`/guide/install`) and path prefixes (`/guide/`) are plain
//! strings throughout the crate. This module holds the rules that decide
//! whether such a string is well formed and how two spellings of the same
//! page are made comparable.

/// Check that a page path is well formed.
///
/// Returns the reason as a static string so callers can attach their own
/// context when building an error.
pub(crate) fn check_page_path(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("path is empty");
    }
    if !path.starts_with('/') {
        return Err("path must start with '/'");
    }
    if path.contains("..") {
        return Err("path must not contain '..'");
    }
    Ok(())
}

/// Check whether a string is a valid root-relative path prefix.
///
/// A prefix starts and ends with `/`, has no empty segments and no `..`.
/// The root prefix `/` is valid.
#[must_use]
pub fn is_valid_prefix(prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    prefix.len() > 1
        && prefix.starts_with('/')
        && prefix.ends_with('/')
        && !prefix.contains("//")
        && !prefix.contains("..")
        && !prefix.chars().any(char::is_whitespace)
}

/// Normalise a page path for lookups against the content index.
///
/// - `#fragment` and `?query` suffixes are dropped
/// - a trailing `.md` or `.html` is removed
/// - a trailing `/index` or `/README` becomes `/`
///
/// ```
/// use sitenav_core::normalize_page_path;
///
/// assert_eq!(normalize_page_path("/guide/install.md"), "/guide/install");
/// assert_eq!(normalize_page_path("/guide/README.md"), "/guide/");
/// assert_eq!(normalize_page_path("/guide/config#env"), "/guide/config");
/// ```
#[must_use]
pub fn normalize_page_path(path: &str) -> String {
    let end = path.find(['#', '?']).unwrap_or(path.len());
    let mut trimmed = &path[..end];

    for ext in [".md", ".html"] {
        if let Some(stem) = trimmed.strip_suffix(ext) {
            trimmed = stem;
            break;
        }
    }

    for index in ["/index", "/README"] {
        if let Some(dir) = trimmed.strip_suffix(index) {
            return format!("{dir}/");
        }
    }

    trimmed.to_owned()
}

/// Express a sidebar key relative to its locale's root path.
///
/// `/en/guide/` under root `/en/` becomes `/guide/`. Keys outside the root,
/// and every key of a locale rooted at `/`, are returned unchanged.
pub(crate) fn locale_relative(key: &str, root: &str) -> String {
    if root == "/" {
        return key.to_owned();
    }
    match key.strip_prefix(root) {
        Some(rest) => format!("/{rest}"),
        None => key.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_page_path_accepts_root_relative() {
        assert!(check_page_path("/").is_ok());
        assert!(check_page_path("/guide/introduction").is_ok());
        assert!(check_page_path("/en/guide/feature/chat.md").is_ok());
    }

    #[test]
    fn test_check_page_path_rejects_malformed() {
        assert_eq!(check_page_path(""), Err("path is empty"));
        assert_eq!(
            check_page_path("guide/introduction"),
            Err("path must start with '/'")
        );
        assert_eq!(
            check_page_path("/guide/../secret"),
            Err("path must not contain '..'")
        );
    }

    #[test]
    fn test_is_valid_prefix() {
        assert!(is_valid_prefix("/"));
        assert!(is_valid_prefix("/guide/"));
        assert!(is_valid_prefix("/en/guide/"));

        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("/guide"));
        assert!(!is_valid_prefix("guide/"));
        assert!(!is_valid_prefix("//"));
        assert!(!is_valid_prefix("/a//b/"));
        assert!(!is_valid_prefix("/../"));
        assert!(!is_valid_prefix("/my guide/"));
    }

    #[test]
    fn test_normalize_page_path() {
        assert_eq!(normalize_page_path("/guide/install"), "/guide/install");
        assert_eq!(normalize_page_path("/guide/install.md"), "/guide/install");
        assert_eq!(normalize_page_path("/guide/install.html"), "/guide/install");
        assert_eq!(normalize_page_path("/guide/"), "/guide/");
        assert_eq!(normalize_page_path("/guide/index.md"), "/guide/");
        assert_eq!(normalize_page_path("/guide/README.md"), "/guide/");
        assert_eq!(normalize_page_path("/README.md"), "/");
        assert_eq!(normalize_page_path("/guide/config#env?x"), "/guide/config");
        assert_eq!(normalize_page_path("/guide/config?tab=1"), "/guide/config");
    }

    #[test]
    fn test_locale_relative() {
        assert_eq!(locale_relative("/en/guide/", "/en/"), "/guide/");
        assert_eq!(locale_relative("/en/", "/en/"), "/");
        assert_eq!(locale_relative("/guide/", "/en/"), "/guide/");
        assert_eq!(locale_relative("/guide/", "/"), "/guide/");
    }
}
