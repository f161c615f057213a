//! Error types for sdkgen-core
//!
//! Extraction failures are described by [`ExtractError`] (kind, offending
//! text, line). The file layer wraps them in [`Error::Extract`] together with
//! the path of the header they came from.

use std::path::PathBuf;

use thiserror::Error;

use crate::target::Target;

/// What the extractor failed to find or understand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractErrorKind {
    /// No `symbol()` returning a quoted command name
    #[error("missing command symbol")]
    MissingSymbol,
    /// No options block introduced by the help option
    #[error("missing options block")]
    MissingOptionsBlock,
    /// A parameter triple did not split into name, definition, description
    #[error("parameter has {segments} segments, expected 3")]
    MalformedParameter { segments: usize },
    /// A definition without a `value<...>` wrapper
    #[error("definition has no value<...> type")]
    MissingValueType,
    /// A `default_value` clause without a parenthesised payload
    #[error("malformed default_value clause")]
    MalformedDefault,
    /// A definition clause outside the known attribute grammar
    #[error("unrecognized definition clause")]
    UnknownClause,
}

/// A single extraction failure inside one file's text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: `{text}`")]
pub struct ExtractError {
    pub kind: ExtractErrorKind,
    /// The raw text that failed to match
    pub text: String,
    /// 1-based line the offending text starts on, when known
    pub line: Option<usize>,
}

impl ExtractError {
    pub fn new(kind: ExtractErrorKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            line: None,
        }
    }

    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Core error type for sdkgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input or writing output failed
    #[error("{context}: {message}")]
    Io { context: String, message: String },

    /// A header could not be turned into a command
    #[error("{location}: {error}")]
    Extract {
        path: PathBuf,
        /// `path` or `path:line`, for display
        location: String,
        error: ExtractError,
    },

    /// A target has no mapping for a source type
    #[error("{target}: no type mapping for `{source_type}` (command `{command}`)")]
    UnknownType {
        target: Target,
        source_type: String,
        command: String,
    },

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// A built-in pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Configuration values are invalid
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create an I/O error with a description of what was being done.
    pub fn io(context: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Attach a file path to an extraction failure.
    pub fn extract(path: impl Into<PathBuf>, error: ExtractError) -> Self {
        let path = path.into();
        let location = match error.line {
            Some(line) => format!("{}:{line}", path.display()),
            None => path.display().to_string(),
        };
        Self::Extract {
            path,
            location,
            error,
        }
    }

    /// Create an unknown-type error for a target.
    pub fn unknown_type(
        target: Target,
        source_type: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            target,
            source_type: source_type.into(),
            command: command.into(),
        }
    }
}

/// Result type alias for sdkgen-core operations
pub type Result<T> = std::result::Result<T, Error>;
