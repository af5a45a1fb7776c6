//! The expression seam.
//!
//! The parser never looks inside a segment once it has been cut out of a
//! line. It hands the raw text to an [`ExprBuilder`], together with a flag
//! telling whether the text is a recipe command. Callers plug in their own
//! expression grammar here; tests can plug in a closure.

use serde::Serialize;
use std::fmt::{self, Display};

/// Builds expression nodes from raw line segments.
///
/// Implementations must accept arbitrary text, including backslash-newline
/// continuations, which the parser leaves in place.
pub trait ExprBuilder {
    /// The expression node type produced.
    type Expr;

    /// Builds an expression from `text`. `is_command` is true for recipe
    /// lines and for the inline recipe after a rule's `;`.
    fn build_expr(&self, text: &str, is_command: bool) -> Self::Expr;
}

impl<F, E> ExprBuilder for F
where
    F: Fn(&str, bool) -> E,
{
    type Expr = E;

    fn build_expr(&self, text: &str, is_command: bool) -> E {
        self(text, is_command)
    }
}

/// A verbatim expression: the segment text as it appeared in the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Expr {
    /// The raw text of the segment.
    pub text: String,
    /// Whether the segment was parsed in command context.
    pub is_command: bool,
}

impl Expr {
    /// Creates a non-command expression.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_command: false,
        }
    }

    /// Creates a command expression.
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_command: true,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The default builder: keeps every segment verbatim as an [`Expr`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimBuilder;

impl ExprBuilder for VerbatimBuilder {
    type Expr = Expr;

    fn build_expr(&self, text: &str, is_command: bool) -> Expr {
        Expr {
            text: text.to_owned(),
            is_command,
        }
    }
}
