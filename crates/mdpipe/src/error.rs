//! CLI error types.

use mdpipe_config::ConfigError;
use mdpipe_renderer::ParseError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Failed to read stylesheet {}: {source}", path.display())]
    Stylesheet {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
