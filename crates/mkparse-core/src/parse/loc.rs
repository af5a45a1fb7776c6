//! Source location tracking.
//!
//! A [`Loc`] names a file and a 1-based line number. Every AST node and
//! every parse error carries one.

use serde::Serialize;
use std::fmt::{self, Display};
use std::sync::Arc;

/// A location in a build-description file.
///
/// The filename is shared so that attaching a location to every node only
/// bumps a reference count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Loc {
    /// Name of the file, as given to the parser.
    pub filename: Arc<str>,
    /// Line number (1-based). Zero means "no line" (e.g. generated nodes).
    pub lineno: usize,
}

impl Loc {
    /// Creates a new location.
    pub fn new(filename: impl Into<Arc<str>>, lineno: usize) -> Self {
        Self {
            filename: filename.into(),
            lineno,
        }
    }
}

impl Default for Loc {
    fn default() -> Self {
        Self::new("", 0)
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.lineno)
    }
}
