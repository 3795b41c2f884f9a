use crate::Category;
use std::fmt;

/// An error produced while building a [`Denylist`](crate::Denylist).
#[derive(Debug)]
pub enum Error {
    /// A denylist pattern is not a valid regular expression.
    InvalidPattern {
        /// The category the pattern was meant for.
        category: Category,

        /// The pattern as written.
        pattern: String,

        /// Why the regex engine rejected it.
        source: regex::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPattern {
                category, pattern, ..
            } => write!(f, "invalid {category} pattern `{pattern}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidPattern { source, .. } => Some(source),
        }
    }
}
