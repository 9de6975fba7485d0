use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while building a document.
#[derive(Debug, Error)]
pub enum IdiodocError {
    /// Host markdown parser error surfaced through the adapter.
    #[error("host parse error at {location}: {message}")]
    HostParse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// A container was closed without a matching opener.
    #[error("no open container to close")]
    UnbalancedContainer,
}

impl IdiodocError {
    /// Create a host parse error with location
    pub fn host_parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::HostParse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}
