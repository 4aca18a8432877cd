//! Locale-aware navigation compiler for documentation sites.
//!
//! This crate provides:
//! - [`NavigationNode`]: Validated navigation tree (pages and groups)
//! - [`Declarations`]: Raw per-locale sidebar/navbar declarations (YAML or JSON)
//! - [`Compiler`]: Loads, cross-checks and resolves declarations into a [`SiteConfig`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use sitenav_core::{CompileOptions, Compiler, ContentIndex, Declarations};
//!
//! let declarations = Declarations::load(Path::new("docs/nav.yaml"))?;
//! let content: ContentIndex = ["/guide/introduction", "/en/guide/introduction"]
//!     .into_iter()
//!     .collect();
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! let compilation = compiler.compile(&declarations.locales, &content)?;
//! println!("{}", compilation.site.to_json()?);
//! # Ok(())
//! # }
//! ```

mod bundle;
mod compiler;
mod content;
mod declaration;
mod diagnostic;
mod loader;
mod node;
mod path;
mod resolver;
mod site_config;
mod validator;

pub use bundle::{LocaleBundle, VersionLink};
pub use compiler::{CompileError, CompileOptions, Compilation, Compiler};
pub use content::ContentIndex;
pub use declaration::{
    DeclarationError, Declarations, GroupDeclaration, LinkDeclaration, LocaleDeclaration,
    NodeDeclaration,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use loader::{DeclaredBundle, LoadError, load_bundles};
pub use node::{Group, Leaf, NavigationNode, NodeError};
pub use path::{is_valid_prefix, normalize_page_path};
pub use resolver::PathResolver;
pub use site_config::SiteConfig;
pub use validator::check_consistency;
