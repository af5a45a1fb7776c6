//! Error types for makefile parsing.
//!
//! Every error carries the location of the logical line that caused it.
//! Errors are fatal for the file being parsed: the parser does not resume
//! after reporting one.

use super::ast::Makefile;
use super::loc::Loc;
use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An assignment with nothing before the `=`.
    #[error("{loc}: *** empty variable name ***")]
    EmptyVariableName {
        /// Location of the offending line.
        loc: Loc,
    },

    /// A directive line, when directives are configured to be rejected.
    #[error("{loc}: *** unsupported directive '{directive}' ***")]
    UnsupportedDirective {
        /// The directive keyword.
        directive: String,
        /// Location of the offending line.
        loc: Loc,
    },
}

impl ParseError {
    /// Creates an empty variable name error.
    pub fn empty_variable_name(loc: Loc) -> Self {
        Self::EmptyVariableName { loc }
    }

    /// Creates an unsupported directive error.
    pub fn unsupported_directive(directive: impl Into<String>, loc: Loc) -> Self {
        Self::UnsupportedDirective {
            directive: directive.into(),
            loc,
        }
    }

    /// Returns the location associated with this error.
    pub fn loc(&self) -> &Loc {
        match self {
            ParseError::EmptyVariableName { loc } => loc,
            ParseError::UnsupportedDirective { loc, .. } => loc,
        }
    }

    /// Returns the line number where this error occurred.
    pub fn line(&self) -> usize {
        self.loc().lineno
    }
}

/// The result of parsing a whole makefile.
///
/// On failure `ast` holds the nodes emitted before the failing line. They
/// are useful for diagnostics only; the file as a whole should be discarded.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed makefile (partial if `error` is set).
    pub ast: Makefile,
    /// The error that stopped parsing, if any.
    pub error: Option<ParseError>,
}

impl ParseResult {
    /// Creates a successful parse result.
    pub fn ok(ast: Makefile) -> Self {
        Self { ast, error: None }
    }

    /// Creates a failed parse result.
    pub fn with_error(ast: Makefile, error: ParseError) -> Self {
        Self {
            ast,
            error: Some(error),
        }
    }

    /// Returns true if parsing succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns true if parsing failed.
    pub fn has_errors(&self) -> bool {
        self.error.is_some()
    }
}
