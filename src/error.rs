use thiserror::Error;

/// Result type for jast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the library's fallible entry points
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexical error at line {line}, column {column} (offset {offset}): {message}")]
    Lexical {
        line: usize,
        column: usize,
        offset: usize,
        message: String,
    },

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error with location information
    pub fn parse_error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

impl From<crate::parser::LexError> for Error {
    fn from(err: crate::parser::LexError) -> Self {
        Self::Lexical {
            line: err.location.line,
            column: err.location.column,
            offset: err.location.offset,
            message: err.kind.to_string(),
        }
    }
}
