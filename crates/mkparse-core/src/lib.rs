#![allow(clippy::tabs_in_doc_comments)] // Makefile recipes start with a tab

//! mkparse Core
//!
//! A library for scanning and parsing Makefile-like build descriptions.
//!
//! # Features
//!
//! - **Line splitting**: backslash-newline continuations are joined into
//!   logical lines, with line numbers tracked for every node
//! - **Classification**: each logical line becomes a rule, an assignment or a
//!   recipe command, using one line of carried state
//! - **Pluggable expressions**: segments are handed to an [`parse::ExprBuilder`],
//!   so callers can bring their own expression grammar
//! - **Discovery**: locate makefiles in a directory or a whole tree
//!
//! # Quick Start
//!
//! ```rust
//! use mkparse_core::parse::parse_makefile;
//!
//! let input = r#"
//! CFLAGS ?= -O2
//! all: main.o util.o
//! 	$(CC) -o $@ $^
//! "#;
//!
//! let result = parse_makefile(input, "Makefile");
//!
//! if result.is_ok() {
//!     for rule in result.ast.rules() {
//!         println!("rule at {}: {}", rule.loc, rule.expr);
//!     }
//!     for assign in result.ast.assignments() {
//!         println!("{} {} {}", assign.lhs, assign.op, assign.rhs);
//!     }
//! } else if let Some(error) = &result.error {
//!     eprintln!("Parse error: {}", error);
//! }
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Line splitter, classifier and AST
//! - [`discover`]: Finding makefiles on disk

pub mod discover;
#[cfg(feature = "generate")]
pub mod generate;
pub mod parse;

// Re-export commonly used types at the crate root
pub use discover::{DiscoveryConfig, find_makefile, list_makefiles};
pub use parse::{
    Ast, Makefile, ParseError, ParseResult, ParserConfig, parse, parse_makefile,
    parse_makefile_with_config,
};
