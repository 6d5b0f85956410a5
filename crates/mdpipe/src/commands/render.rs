//! `mdpipe render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use mdpipe_config::{CliSettings, Config, DocumentConfig};

use crate::document::wrap_document;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to convert (default: stdin; `-` also reads stdin).
    input: Option<PathBuf>,

    /// File to write HTML to (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdpipe.toml).
    #[arg(short, long, env = "MDPIPE_CONFIG")]
    config: Option<PathBuf>,

    /// Wrap the fragment in a complete HTML document (overrides config).
    #[arg(long)]
    standalone: bool,

    /// Emit only the HTML fragment (overrides config).
    #[arg(long, conflicts_with = "standalone")]
    fragment: bool,

    /// Document title for standalone output (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Stylesheet to inline in standalone output (overrides config).
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Enable verbose output (debug logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, conversion or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            standalone: self.resolve_standalone(),
            title: self.title,
            stylesheet: self.stylesheet,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let input = read_input(self.input.as_deref())?;
        let html = render(&input, &config.document_resolved)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                output.success(&format!(
                    "Converted {} to {}",
                    display_input(self.input.as_deref()),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Resolve `--standalone` / `--fragment` into an optional override.
    fn resolve_standalone(&self) -> Option<bool> {
        if self.standalone {
            Some(true)
        } else if self.fragment {
            Some(false)
        } else {
            None
        }
    }
}

/// Convert markdown bytes according to the document configuration.
pub(crate) fn render(input: &[u8], document: &DocumentConfig) -> Result<String, CliError> {
    let fragment = mdpipe_renderer::parse_bytes(input)?;
    if !document.standalone {
        return Ok(fragment);
    }

    let css = document
        .stylesheet
        .as_deref()
        .map(read_stylesheet)
        .transpose()?;

    Ok(wrap_document(
        &fragment,
        &document.title,
        &document.lang,
        css.as_deref(),
    ))
}

fn read_stylesheet(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Stylesheet {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the whole input, from a file or stdin.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading input file");
            Ok(std::fs::read(path)?)
        }
        _ => {
            tracing::debug!("Reading input from stdin");
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn display_input(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_owned(),
    }
}
