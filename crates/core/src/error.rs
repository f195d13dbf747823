use std::io;
use std::path::PathBuf;

/// Errors that can occur during calcrepl operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown command: {0}. Type 'menu' to see available commands.")]
    UnknownCommand(String),

    #[error("Unsupported operation: {0}")]
    UnknownOperation(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Cannot divide by zero")]
    DivideByZero,

    #[error("Error loading plugin {}: {reason}", path.display())]
    PluginLoad { path: PathBuf, reason: String },

    #[error("{0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Errors the REPL reports as `Error: ...` rather than `Unexpected error: ...`.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::DivideByZero | Error::ParseError(_)
        )
    }

    pub(crate) fn plugin_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::PluginLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for calcrepl operations
pub type Result<T> = std::result::Result<T, Error>;
