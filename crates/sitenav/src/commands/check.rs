//! `sitenav check` command implementation.

use clap::Args;

use super::CompileArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) compile: CompileArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any error diagnostic is reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, compilation) = self.compile.run(None, &output)?;

        let site = &compilation.site;
        output.success(&format!(
            "Navigation is consistent across {} locale(s) ({} warning(s))",
            site.locales().len(),
            compilation.warnings.len()
        ));
        output.info(&format!("Default locale: {}", site.default_locale()));
        Ok(())
    }
}
