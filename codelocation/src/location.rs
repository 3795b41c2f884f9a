use serde::{Deserialize, Serialize};
use std::fmt;

/// A place in the source code where something happened, usually a failed
/// assertion.
///
/// The default value (empty file name, line 0) means the location could not
/// be determined; see [`CodeLocation::is_unknown`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    /// The path of the source file, as recorded in the debug info.
    pub file_name: String,

    /// The 1-based line number, or 0 if unknown.
    pub line_number: u32,
}

impl CodeLocation {
    /// Create a new location.
    pub fn new(file_name: impl Into<String>, line_number: u32) -> Self {
        CodeLocation {
            file_name: file_name.into(),
            line_number,
        }
    }

    /// The location of whoever called the function this is used in.
    ///
    /// Unlike [`capture`](crate::capture), this does not walk the stack: it
    /// relies on `#[track_caller]`, so every function between the call site
    /// of interest and this call must also be marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        std::panic::Location::caller().into()
    }

    /// Whether this is the zero value returned when a frame couldn't be
    /// resolved.
    pub fn is_unknown(&self) -> bool {
        self.file_name.is_empty() && self.line_number == 0
    }
}

impl From<&std::panic::Location<'_>> for CodeLocation {
    fn from(location: &std::panic::Location<'_>) -> Self {
        CodeLocation::new(location.file(), location.line())
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line_number)
    }
}
