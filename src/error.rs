//! Error types for extractor compilation.

use std::fmt;

/// A compile-time error in an extraction argument.
///
/// Errors can be tagged with the 1-based position of the offending
/// command-line argument and its original text, so a failure is
/// reproducible from the message alone. Extraction itself never fails at
/// evaluation time; the error path exists only for compilation.
#[derive(Debug, Clone)]
pub struct Error {
    /// The underlying cause.
    pub message: String,
    /// The 1-based argument index and argument text, when known.
    pub extract: Option<(usize, String)>,
}

impl Error {
    /// Create a compile error with just a message.
    pub fn compile(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extract: None,
        }
    }

    /// Tag an error with the argument it came from.
    pub fn in_extract(mut self, index: usize, arg: &str) -> Self {
        self.extract = Some((index, arg.to_string()));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extract {
            Some((index, arg)) => {
                write!(f, "error parsing extract {}: {:?}: {}", index, arg, self.message)
            }
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for compilation and extraction.
pub type Result<T> = std::result::Result<T, Error>;
