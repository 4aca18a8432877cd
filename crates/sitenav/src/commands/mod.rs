//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_content::ContentScanner;
use sitenav_core::{CompileError, CompileOptions, Compilation, Compiler, Declarations};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Arguments shared by every command that compiles navigation.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// Locale declarations file, YAML or JSON (overrides config).
    #[arg(short, long)]
    pub(crate) nav_file: Option<PathBuf>,

    /// URL path the site is served under (overrides config).
    #[arg(long)]
    pub(crate) base: Option<String>,

    /// Site version substituted into `{version}` labels (overrides config).
    #[arg(long, env = "SITENAV_VERSION")]
    pub(crate) site_version: Option<String>,

    /// Report cross-locale structural differences as warnings.
    #[arg(long)]
    pub(crate) no_strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CompileArgs {
    /// Build config overrides from the command line.
    fn cli_settings(&self, output: Option<PathBuf>) -> CliSettings {
        CliSettings {
            base: self.base.clone(),
            version: self.site_version.clone(),
            source_dir: self.source_dir.clone(),
            nav_file: self.nav_file.clone(),
            strict: self.no_strict.then_some(false),
            output,
        }
    }

    /// Load configuration, declarations and content, then compile.
    ///
    /// Diagnostics are printed before returning, including those of a
    /// failed compile.
    pub(crate) fn run(
        &self,
        output_override: Option<PathBuf>,
        output: &Output,
    ) -> Result<(Config, Compilation), CliError> {
        let settings = self.cli_settings(output_override);
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let declarations = Declarations::load(&config.docs_resolved.nav_file)?;
        let content = ContentScanner::new(config.docs_resolved.source_dir.clone()).scan()?;

        let compiler = Compiler::new(CompileOptions {
            base_path: config.site.base.clone(),
            version: config.site.version.clone(),
            strict: config.validation.strict,
            repo: config.site.repo.clone(),
        });

        match compiler.compile(&declarations.locales, &content) {
            Ok(compilation) => {
                output.diagnostics(&compilation.warnings);
                Ok((config, compilation))
            }
            Err(CompileError::ValidationFailed(diagnostics)) => {
                output.diagnostics(&diagnostics);
                Err(CompileError::ValidationFailed(diagnostics).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
