//! Character-level scanners for makefile lines.
//!
//! This module contains the nom-based helpers the parser uses to find
//! separators, terminators and assignment operators inside one logical line,
//! and to trim whitespace the way make does.

use nom::{
    IResult,
    bytes::complete::{take_till, take_while, take_while1},
    character::complete::space0,
};

use super::ast::AssignOp;

/// Directive keywords recognised when directive lines are rejected.
pub const DIRECTIVES: &[&str] = &[
    "include", "-include", "sinclude", "define", "endef", "ifdef", "ifndef", "ifeq", "ifneq",
    "else", "endif", "override", "export", "unexport", "vpath",
];

/// Whitespace as understood by C's `isspace`.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Characters that can appear in a directive keyword.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Consumes input up to (not including) the first character in `stops`.
fn scan_until<'a>(input: &'a str, stops: &[char]) -> IResult<&'a str, &'a str> {
    take_till(|c: char| stops.contains(&c))(input)
}

/// Returns the byte offset of the first character in `stops`, if any.
fn find_first_of(input: &str, stops: &[char]) -> Option<usize> {
    let (rest, before) = scan_until(input, stops).ok()?;
    if rest.is_empty() {
        None
    } else {
        Some(before.len())
    }
}

/// Finds the separator that decides between a rule and an assignment.
///
/// This is the offset of the first `:` or `=` in the line.
pub fn find_separator(line: &str) -> Option<usize> {
    find_first_of(line, &[':', '='])
}

/// Finds a rule terminator (`=` or `;`) in the given text.
pub fn find_terminator(text: &str) -> Option<usize> {
    find_first_of(text, &['=', ';'])
}

/// Strips leading whitespace.
pub fn strip_left_spaces(text: &str) -> &str {
    let result: IResult<&str, &str> = take_while(is_space)(text);
    match result {
        Ok((rest, _)) => rest,
        Err(_) => text,
    }
}

/// Strips leading and trailing whitespace.
pub fn strip_spaces(text: &str) -> &str {
    strip_left_spaces(text).trim_end_matches(is_space)
}

/// Selects the assignment operator for an `=` at offset `sep`.
///
/// Returns the operator and the end offset of the left-hand side. `sep`
/// must be non-zero and point at an ASCII character.
pub fn assign_op(line: &str, sep: usize) -> (AssignOp, usize) {
    match line.as_bytes()[sep - 1] {
        b':' => (AssignOp::ColonEq, sep - 1),
        b'+' => (AssignOp::PlusEq, sep - 1),
        b'?' => (AssignOp::QuestionEq, sep - 1),
        _ => (AssignOp::Eq, sep),
    }
}

/// Parses the first word of a line (after optional blanks).
fn leading_word(input: &str) -> IResult<&str, &str> {
    let (input, _) = space0(input)?;
    take_while1(is_word_char)(input)
}

/// Returns the directive keyword a line starts with, if any.
///
/// The keyword must be followed by whitespace or the end of the line, so
/// `include foo.mk` and `endif` match but `include: foo` does not.
pub fn directive_keyword(line: &str) -> Option<&str> {
    let (rest, word) = leading_word(line).ok()?;
    let terminated = rest.chars().next().is_none_or(is_space);
    if terminated && DIRECTIVES.contains(&word) {
        Some(word)
    } else {
        None
    }
}
