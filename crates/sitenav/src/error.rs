//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_content::ScanError;
use sitenav_core::{CompileError, DeclarationError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Declaration(#[from] DeclarationError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("Failed to serialize site configuration: {0}")]
    Json(#[from] serde_json::Error),
}
