//! `mdpipe passes` command implementation.

use std::io::Write;

use clap::Args;
use mdpipe_renderer::PASSES;

use crate::error::CliError;

/// Arguments for the passes command.
#[derive(Args)]
pub(crate) struct PassesArgs {
    /// Prefix each pass with its position in the pipeline.
    #[arg(short, long)]
    numbered: bool,
}

impl PassesArgs {
    /// Print the pipeline pass order, one pass per line.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(self.listing().as_bytes())?;
        Ok(())
    }

    fn listing(&self) -> String {
        PASSES
            .iter()
            .enumerate()
            .map(|(i, pass)| {
                if self.numbered {
                    format!("{:>2}. {pass}\n", i + 1)
                } else {
                    format!("{pass}\n")
                }
            })
            .collect()
    }
}
