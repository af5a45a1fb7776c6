//! Parser module for makefiles.
//!
//! This module turns the text of a makefile into a flat list of AST nodes:
//! assignments, rules and recipe commands, each tagged with its location.
//!
//! # Example
//!
//! ```rust
//! use mkparse_core::parse::{parse, Ast};
//!
//! let input = "CC := gcc\nall: main.o\n\t$(CC) -o all main.o\n";
//!
//! let mut asts = Vec::new();
//! parse(input, "Makefile", &mut asts).unwrap();
//! for ast in &asts {
//!     println!("{}: {}", ast.loc(), ast);
//! }
//! assert!(matches!(asts[2], Ast::Command(_)));
//! ```

mod ast;
mod error;
mod expr;
mod lexer;
mod loc;
mod parser;
pub mod splitter;

// Re-export public types
pub use ast::{
    AssignAst, AssignDirective, AssignOp, Ast, CommandAst, Makefile, RuleAst, RuleTerm,
};
pub use error::{ParseError, ParseResult};
pub use expr::{Expr, ExprBuilder, VerbatimBuilder};
pub use loc::Loc;
pub use parser::{
    DirectivePolicy, Parser, ParserConfig, ParserState, parse, parse_makefile,
    parse_makefile_with_config, parse_with,
};

// Re-export lexer utilities that may be useful for custom tooling
pub use lexer::{DIRECTIVES, directive_keyword};
