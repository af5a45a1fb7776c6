//! AST data structures for makefiles.
//!
//! The parser produces a flat, ordered list of [`Ast`] nodes. Recipe
//! commands are not nested under their rule; they follow it in the list.

use super::expr::Expr;
use super::loc::Loc;
use serde::Serialize;
use std::fmt::{self, Display};

/// The operator of a variable assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    /// `=`: recursively expanded, evaluated on use.
    Eq,
    /// `:=`: simply expanded, evaluated immediately.
    ColonEq,
    /// `+=`: append to the existing value.
    PlusEq,
    /// `?=`: assign only if the variable is not yet set.
    QuestionEq,
}

impl AssignOp {
    /// Returns the operator as written in a makefile.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Eq => "=",
            AssignOp::ColonEq => ":=",
            AssignOp::PlusEq => "+=",
            AssignOp::QuestionEq => "?=",
        }
    }
}

impl Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive prefix on an assignment.
///
/// The parser always produces [`AssignDirective::None`]; the other variants
/// are reserved for `override`/`export` prefixed forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignDirective {
    /// No directive.
    #[default]
    None,
    /// `override VAR = ...`
    Override,
    /// `export VAR = ...`
    Export,
}

/// The character ending a rule's target/prerequisite part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTerm {
    /// `;` introduces an inline recipe.
    Semicolon,
    /// `=` introduces a target-specific variable value.
    Equals,
}

impl RuleTerm {
    /// Returns the terminator character.
    pub fn as_char(&self) -> char {
        match self {
            RuleTerm::Semicolon => ';',
            RuleTerm::Equals => '=',
        }
    }
}

/// A variable assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignAst<E = Expr> {
    /// The variable name expression.
    pub lhs: E,
    /// The value expression.
    pub rhs: E,
    /// The assignment operator.
    pub op: AssignOp,
    /// Directive prefix.
    pub directive: AssignDirective,
    /// Where the assignment starts.
    pub loc: Loc,
}

/// A rule line: targets, prerequisites and an optional trailing part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleAst<E = Expr> {
    /// Everything before the terminator (or the whole line), trimmed.
    pub expr: E,
    /// The terminator, if the line has one.
    pub term: Option<RuleTerm>,
    /// Text after the terminator. Built in command context for `;`.
    pub after_term: Option<E>,
    /// Where the rule starts.
    pub loc: Loc,
}

/// A recipe command belonging to the most recent rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandAst<E = Expr> {
    /// The command text with its leading tab removed.
    pub expr: E,
    /// Location of the owning rule.
    pub loc: Loc,
}

/// A node of the parsed makefile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Ast<E = Expr> {
    /// A variable assignment.
    Assign(AssignAst<E>),
    /// A rule.
    Rule(RuleAst<E>),
    /// A recipe command.
    Command(CommandAst<E>),
}

impl<E> Ast<E> {
    /// Returns the location of this node.
    pub fn loc(&self) -> &Loc {
        match self {
            Ast::Assign(ast) => &ast.loc,
            Ast::Rule(ast) => &ast.loc,
            Ast::Command(ast) => &ast.loc,
        }
    }

    /// Returns a short name for the node kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Ast::Assign(_) => "assign",
            Ast::Rule(_) => "rule",
            Ast::Command(_) => "command",
        }
    }

    /// Returns true if this is an assignment.
    pub fn is_assign(&self) -> bool {
        matches!(self, Ast::Assign(_))
    }

    /// Returns true if this is a rule.
    pub fn is_rule(&self) -> bool {
        matches!(self, Ast::Rule(_))
    }

    /// Returns true if this is a command.
    pub fn is_command(&self) -> bool {
        matches!(self, Ast::Command(_))
    }
}

impl<E: Display> Display for Ast<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Assign(ast) => write!(f, "{} {} {}", ast.lhs, ast.op, ast.rhs),
            Ast::Rule(ast) => {
                let expr = ast.expr.to_string();
                f.write_str(&expr)?;
                match (ast.term, &ast.after_term) {
                    (Some(RuleTerm::Semicolon), Some(after)) => write!(f, "; {}", after),
                    (Some(RuleTerm::Equals), Some(after)) => write!(f, " = {}", after),
                    (Some(term), None) => write!(f, "{}", term.as_char()),
                    // A blank line is skipped on reparse, a lone space is not
                    (None, _) if expr.is_empty() => f.write_str(" "),
                    (None, _) => Ok(()),
                }
            }
            Ast::Command(ast) => write!(f, "\t{}", ast.expr),
        }
    }
}

/// A parsed makefile: its name and its nodes in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Makefile<E = Expr> {
    /// The filename used for locations.
    pub filename: String,
    /// All nodes, in file order.
    pub asts: Vec<Ast<E>>,
}

impl<E> Makefile<E> {
    /// Creates a makefile from its nodes.
    pub fn new(filename: impl Into<String>, asts: Vec<Ast<E>>) -> Self {
        Self {
            filename: filename.into(),
            asts,
        }
    }

    /// Returns an iterator over all rules.
    pub fn rules(&self) -> impl Iterator<Item = &RuleAst<E>> {
        self.asts.iter().filter_map(|ast| match ast {
            Ast::Rule(rule) => Some(rule),
            _ => None,
        })
    }

    /// Returns an iterator over all assignments.
    pub fn assignments(&self) -> impl Iterator<Item = &AssignAst<E>> {
        self.asts.iter().filter_map(|ast| match ast {
            Ast::Assign(assign) => Some(assign),
            _ => None,
        })
    }

    /// Returns an iterator over all commands.
    pub fn commands(&self) -> impl Iterator<Item = &CommandAst<E>> {
        self.asts.iter().filter_map(|ast| match ast {
            Ast::Command(command) => Some(command),
            _ => None,
        })
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.asts.len()
    }

    /// Returns true if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.asts.is_empty()
    }
}

impl<E> Default for Makefile<E> {
    fn default() -> Self {
        Self::new(String::new(), Vec::new())
    }
}

impl<E: Display> Display for Makefile<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ast in &self.asts {
            writeln!(f, "{}", ast)?;
        }
        Ok(())
    }
}
