//! Common error types used throughout tabloforge.
//!
//! Every failure aborts the extraction run, so the variants exist to give the
//! operator a precise message and to let callers classify failures through
//! [`Error::kind`].

use std::fmt;
use std::path::PathBuf;

/// Common error type for tabloforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller passed an argument that cannot be used at all.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Something that must exist could not be found.
    #[error("{what} not found: {}", path.display())]
    NotFound {
        /// What was looked up (e.g. "segment directory", "duration").
        what: String,
        /// The path the lookup was performed against.
        path: PathBuf,
    },

    /// A required external tool is not available.
    #[error("Tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool ran but reported failure.
    #[error("Tool error [{tool}]: {message}")]
    ToolFailed { tool: String, message: String },

    /// An external tool produced output that could not be understood.
    #[error("Failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    ExternalToolFailure,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::NotFound => write!(f, "not found"),
            Self::ExternalToolFailure => write!(f, "external tool failure"),
            Self::Io => write!(f, "i/o"),
        }
    }
}

impl Error {
    /// Create a new InvalidArgument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            what: what.into(),
            path: path.into(),
        }
    }

    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Map an I/O error raised while accessing `path`.
    ///
    /// `io::ErrorKind::NotFound` becomes [`Error::NotFound`] so a missing
    /// directory reads as such instead of as a generic I/O failure.
    pub fn from_io(err: std::io::Error, what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(what, path)
        } else {
            Self::Io(err)
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ToolNotFound { .. } | Self::ToolFailed { .. } | Self::ParseError { .. } => {
                ErrorKind::ExternalToolFailure
            }
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
