//! Error types for reading circle graph attributes.

use std::io;
use thiserror::Error;

/// Result type alias using [`AttributeError`].
pub type Result<T> = std::result::Result<T, AttributeError>;

/// Errors that can occur while reading widget attributes.
#[derive(Error, Debug)]
pub enum AttributeError {
    /// The attribute file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The attribute document is not valid YAML.
    #[error("Attribute parse error at line {line}: {message}")]
    Parse {
        /// Line of the first error, 0 if unknown.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// A color attribute holds something that is not a color.
    #[error("Invalid color for {name}: {value}")]
    InvalidColor {
        /// Attribute name.
        name: String,
        /// Offending value, as written.
        value: String,
    },

    /// An attribute holds a value of the wrong kind.
    #[error("Attribute {name} is not a {expected}")]
    TypeMismatch {
        /// Attribute name.
        name: String,
        /// Kind of value that was expected.
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_name() {
        let err = AttributeError::InvalidColor {
            name: "circle2Color".to_string(),
            value: "teal-ish".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("circle2Color"));
        assert!(display.contains("teal-ish"));
    }

    #[test]
    fn test_parse_error_includes_line() {
        let err = AttributeError::Parse {
            line: 4,
            message: "unexpected token".to_string(),
        };
        assert!(err.to_string().contains("line 4"));
    }
}
