//! Content directory scanner for sitenav.
//!
//! Walks a documentation source directory and collects the page paths that
//! navigation leaves may point at, as a [`ContentIndex`].
//!
//! # Path Mapping
//!
//! - `README.md`, `index.md` -> `/`
//! - `guide/install.md` -> `/guide/install`
//! - `guide/README.md`, `guide/index.md` -> `/guide/`
//!
//! Hidden files and directories (leading `.`) are skipped, which also keeps
//! theme directories such as `.vuepress/` out of the index.

use std::fs;
use std::path::{Path, PathBuf};

use sitenav_core::ContentIndex;

/// Error returned when the content directory cannot be scanned.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Source directory does not exist.
    #[error("Content directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the source directory.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Directory that failed to read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Discovers content pages by walking the filesystem.
pub struct ContentScanner {
    source_dir: PathBuf,
}

impl ContentScanner {
    /// Create a scanner rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source directory.
    ///
    /// Unreadable subdirectories are logged and skipped; only a missing or
    /// unreadable root is an error.
    pub fn scan(&self) -> Result<ContentIndex, ScanError> {
        if !self.source_dir.is_dir() {
            return Err(ScanError::NotFound(self.source_dir.clone()));
        }

        let entries = fs::read_dir(&self.source_dir).map_err(|source| ScanError::Io {
            path: self.source_dir.clone(),
            source,
        })?;

        let mut index = ContentIndex::new();
        self.scan_entries(entries, "", &mut index);

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            pages = index.len(),
            "Scanned content directory"
        );
        Ok(index)
    }

    fn scan_directory(&self, dir_path: &Path, url_prefix: &str, index: &mut ContentIndex) {
        match fs::read_dir(dir_path) {
            Ok(entries) => self.scan_entries(entries, url_prefix, index),
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory");
            }
        }
    }

    fn scan_entries(&self, entries: fs::ReadDir, url_prefix: &str, index: &mut ContentIndex) {
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                let child_prefix = format!("{url_prefix}{name}/");
                self.scan_directory(&entry.path(), &child_prefix, index);
            } else if Path::new(&name).extension().is_some_and(|e| e == "md") {
                index.insert(&file_name_to_url(&name, url_prefix));
            }
        }
    }
}

/// Convert a markdown file name to a root-relative page path.
///
/// `url_prefix` is the directory part without leading slash, ending in `/`
/// unless empty.
///
/// Examples:
/// - `index.md`, `""` -> `"/"`
/// - `guide.md`, `""` -> `"/guide"`
/// - `README.md`, `"guide/"` -> `"/guide/"`
/// - `setup.md`, `"guide/"` -> `"/guide/setup"`
pub(crate) fn file_name_to_url(name: &str, url_prefix: &str) -> String {
    let stem = name.strip_suffix(".md").unwrap_or(name);
    if stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme") {
        format!("/{url_prefix}")
    } else {
        format!("/{url_prefix}{stem}")
    }
}
