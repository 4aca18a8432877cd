//! `sitenav build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use sitenav_core::SiteConfig;

use super::CompileArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub(crate) compile: CompileArgs,

    /// Output path for the site configuration JSON (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if compilation fails or the artifact cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, compilation) = self.compile.run(self.output.clone(), &output)?;

        write_site_config(&compilation.site, &config.output_path)?;

        output.success(&format!(
            "Wrote {} locale(s) to {}",
            compilation.site.locales().len(),
            config.output_path.display()
        ));
        if !compilation.warnings.is_empty() {
            output.highlight(&format!("{} warning(s)", compilation.warnings.len()));
        }
        Ok(())
    }
}

/// Serialize `site` and write it to `path`, creating parent directories.
fn write_site_config(site: &SiteConfig, path: &Path) -> Result<(), CliError> {
    let json = site.to_json()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Wrote site configuration");
    Ok(())
}
