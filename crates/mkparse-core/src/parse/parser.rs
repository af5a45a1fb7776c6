//! Line classification and node building for makefiles.
//!
//! The parser walks the buffer one logical line at a time. Each line is
//! either ignored, appended as a recipe command, or split into a rule or an
//! assignment. A small state machine remembers whether the last node was a
//! rule, which decides whether a tab-indented line is a recipe command.

use super::ast::{AssignAst, AssignDirective, Ast, CommandAst, Makefile, RuleAst, RuleTerm};
use super::error::{ParseError, ParseResult};
use super::expr::{ExprBuilder, VerbatimBuilder};
use super::lexer::{
    assign_op, directive_keyword, find_separator, find_terminator, strip_left_spaces, strip_spaces,
};
use super::loc::Loc;
use super::splitter::LogicalLines;
use log::{debug, log_enabled, trace, Level};

/// What to do with lines that start with a make directive keyword.
///
/// Directives are not implemented by this parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectivePolicy {
    /// Parse the line as a rule or assignment like any other line.
    #[default]
    FallThrough,
    /// Stop with [`ParseError::UnsupportedDirective`].
    Reject,
}

/// Configuration options for the parser.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Line number of the first line of the buffer.
    pub start_line: usize,
    /// If true, every node gets `start_line` regardless of where it is.
    /// Used for text evaluated on behalf of another location.
    pub fixed_lineno: bool,
    /// Handling of directive lines.
    pub directives: DirectivePolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            start_line: 1,
            fixed_lineno: false,
            directives: DirectivePolicy::FallThrough,
        }
    }
}

impl ParserConfig {
    /// Creates a new parser config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that rejects directive lines.
    pub fn reject_directives() -> Self {
        Self {
            directives: DirectivePolicy::Reject,
            ..Default::default()
        }
    }

    /// Sets the line number of the first line.
    pub fn with_start_line(mut self, line: usize) -> Self {
        self.start_line = line;
        self
    }

    /// Sets whether line numbers stay fixed at `start_line`.
    pub fn with_fixed_lineno(mut self, fixed: bool) -> Self {
        self.fixed_lineno = fixed;
        self
    }

    /// Sets the directive policy.
    pub fn with_directive_policy(mut self, policy: DirectivePolicy) -> Self {
        self.directives = policy;
        self
    }
}

/// Whether a following tab-indented line may be a recipe command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserState {
    /// Initial state, and the state after an assignment.
    #[default]
    NotAfterRule,
    /// After a line containing `:`.
    AfterRule,
    /// After a line parsed as a rule although it has no `:`.
    MaybeAfterRule,
}

/// A parser for one buffer.
///
/// Holds the per-parse state: current location, state machine and the
/// location of the last rule. Nothing is shared between parser instances,
/// so independent buffers can be parsed in parallel.
pub struct Parser<'a, B> {
    buf: &'a str,
    builder: &'a B,
    config: &'a ParserConfig,
    state: ParserState,
    loc: Loc,
    rule_loc: Loc,
}

impl<'a, B: ExprBuilder> Parser<'a, B> {
    /// Creates a parser for `buf`, reporting locations in `filename`.
    pub fn new(buf: &'a str, filename: &str, builder: &'a B, config: &'a ParserConfig) -> Self {
        let loc = Loc::new(filename, config.start_line);
        Self {
            buf,
            builder,
            config,
            state: ParserState::NotAfterRule,
            rule_loc: loc.clone(),
            loc,
        }
    }

    /// Returns the current state machine state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Returns the location of the line being (or last) parsed.
    pub fn loc(&self) -> &Loc {
        &self.loc
    }

    /// Parses the whole buffer, appending nodes to `out` in file order.
    ///
    /// On error, `out` keeps the nodes emitted before the failing line.
    pub fn parse(&mut self, out: &mut Vec<Ast<B::Expr>>) -> Result<(), ParseError> {
        debug!(
            "Parsing {} ({} bytes, directives={:?})",
            self.loc.filename,
            self.buf.len(),
            self.config.directives
        );
        let first = out.len();
        let mut lineno = self.config.start_line;

        for line in LogicalLines::new(self.buf) {
            if !self.config.fixed_lineno {
                self.loc.lineno = lineno;
                lineno += line.newlines;
            }
            if let Err(error) = self.parse_line(line.text, out) {
                debug!("Parse error: {}", error);
                return Err(error);
            }
        }

        debug!(
            "Parsing complete: {} nodes from {}",
            out.len() - first,
            self.loc.filename
        );
        Ok(())
    }

    fn parse_line(&mut self, line: &str, out: &mut Vec<Ast<B::Expr>>) -> Result<(), ParseError> {
        if line.is_empty() || line == "\r" {
            return Ok(());
        }
        trace!("{}: {:?} ({:?})", self.loc, line, self.state);

        if let Some(command) = line.strip_prefix('\t')
            && self.state != ParserState::NotAfterRule
        {
            out.push(Ast::Command(CommandAst {
                expr: self.builder.build_expr(command, true),
                loc: self.rule_loc.clone(),
            }));
            return Ok(());
        }

        if self.config.directives == DirectivePolicy::Reject || log_enabled!(Level::Trace) {
            self.check_directive(line)?;
        }

        match find_separator(line) {
            None => {
                self.parse_rule(line, None, out);
                Ok(())
            }
            Some(sep) => match line.as_bytes()[sep] {
                b'=' => self.parse_assign(line, sep, out),
                b':' if line.as_bytes().get(sep + 1) == Some(&b'=') => {
                    self.parse_assign(line, sep + 1, out)
                }
                b':' => {
                    self.parse_rule(line, Some(sep), out);
                    Ok(())
                }
                other => unreachable!("separator search stopped at {:?}", other as char),
            },
        }
    }

    fn check_directive(&self, line: &str) -> Result<(), ParseError> {
        let Some(keyword) = directive_keyword(line) else {
            return Ok(());
        };
        match self.config.directives {
            DirectivePolicy::FallThrough => {
                trace!(
                    "{}: directive '{}' parsed as rule or assignment",
                    self.loc, keyword
                );
                Ok(())
            }
            DirectivePolicy::Reject => Err(ParseError::unsupported_directive(
                keyword,
                self.loc.clone(),
            )),
        }
    }

    /// Builds a rule. `sep` is the offset of the `:` that made this a rule,
    /// or `None` if the line has neither `:` nor `=`.
    fn parse_rule(&mut self, line: &str, sep: Option<usize>, out: &mut Vec<Ast<B::Expr>>) {
        let is_rule = line.contains(':');
        let start = sep.map_or(0, |sep| sep + 1);

        let ast = match find_terminator(&line[start..]) {
            Some(found) => {
                let found = start + found;
                let term = match line.as_bytes()[found] {
                    b';' => RuleTerm::Semicolon,
                    b'=' => RuleTerm::Equals,
                    other => unreachable!("terminator search stopped at {:?}", other as char),
                };
                let after_term = self.builder.build_expr(
                    strip_left_spaces(&line[found + 1..]),
                    term == RuleTerm::Semicolon,
                );
                RuleAst {
                    expr: self.builder.build_expr(strip_spaces(&line[..found]), false),
                    term: Some(term),
                    after_term: Some(after_term),
                    loc: self.loc.clone(),
                }
            }
            None => RuleAst {
                expr: self.builder.build_expr(strip_spaces(line), false),
                term: None,
                after_term: None,
                loc: self.loc.clone(),
            },
        };

        out.push(Ast::Rule(ast));
        self.rule_loc = self.loc.clone();
        self.state = if is_rule {
            ParserState::AfterRule
        } else {
            ParserState::MaybeAfterRule
        };
    }

    /// Builds an assignment. `sep` is the offset of the defining `=`.
    fn parse_assign(
        &mut self,
        line: &str,
        sep: usize,
        out: &mut Vec<Ast<B::Expr>>,
    ) -> Result<(), ParseError> {
        if sep == 0 {
            return Err(ParseError::empty_variable_name(self.loc.clone()));
        }
        let (op, lhs_end) = assign_op(line, sep);

        out.push(Ast::Assign(AssignAst {
            lhs: self.builder.build_expr(strip_spaces(&line[..lhs_end]), false),
            rhs: self
                .builder
                .build_expr(strip_left_spaces(&line[sep + 1..]), false),
            op,
            directive: AssignDirective::None,
            loc: self.loc.clone(),
        }));
        self.state = ParserState::NotAfterRule;
        Ok(())
    }
}

/// Parses `buf` with the verbatim expression builder and default settings.
pub fn parse(buf: &str, filename: &str, out: &mut Vec<Ast>) -> Result<(), ParseError> {
    parse_with(buf, filename, &VerbatimBuilder, &ParserConfig::default(), out)
}

/// Parses `buf` with the given expression builder and configuration.
pub fn parse_with<B: ExprBuilder>(
    buf: &str,
    filename: &str,
    builder: &B,
    config: &ParserConfig,
    out: &mut Vec<Ast<B::Expr>>,
) -> Result<(), ParseError> {
    Parser::new(buf, filename, builder, config).parse(out)
}

/// Parses a makefile with the given configuration.
pub fn parse_makefile_with_config(buf: &str, filename: &str, config: &ParserConfig) -> ParseResult {
    let mut asts = Vec::new();
    let outcome = parse_with(buf, filename, &VerbatimBuilder, config, &mut asts);
    let ast = Makefile::new(filename, asts);
    match outcome {
        Ok(()) => ParseResult::ok(ast),
        Err(error) => ParseResult::with_error(ast, error),
    }
}

/// Parses a makefile using the default configuration.
pub fn parse_makefile(buf: &str, filename: &str) -> ParseResult {
    parse_makefile_with_config(buf, filename, &ParserConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{AssignOp, Expr};

    fn nodes(input: &str) -> Vec<Ast> {
        let mut out = Vec::new();
        parse(input, "Makefile", &mut out).unwrap();
        out
    }

    fn final_state(input: &str) -> ParserState {
        let config = ParserConfig::default();
        let mut parser = Parser::new(input, "Makefile", &VerbatimBuilder, &config);
        let mut out = Vec::new();
        parser.parse(&mut out).unwrap();
        parser.state()
    }

    fn expect_rule(ast: &Ast) -> &RuleAst {
        match ast {
            Ast::Rule(rule) => rule,
            other => panic!("Expected rule, got {:?}", other),
        }
    }

    fn expect_assign(ast: &Ast) -> &AssignAst {
        match ast {
            Ast::Assign(assign) => assign,
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    fn expect_command(ast: &Ast) -> &CommandAst {
        match ast {
            Ast::Command(command) => command,
            other => panic!("Expected command, got {:?}", other),
        }
    }

    #[test]
    fn parse_empty_buffer() {
        assert!(nodes("").is_empty());
        assert_eq!(final_state(""), ParserState::NotAfterRule);
    }

    #[test]
    fn blank_and_cr_lines_are_ignored() {
        assert!(nodes("\n\n\r\n\r").is_empty());
        // A bare "\r" line does not reset the state after a rule.
        let out = nodes("x:\n\r\n\tcmd\n");
        assert_eq!(out.len(), 2);
        assert!(out[1].is_command());
    }

    #[test]
    fn simple_rule() {
        let out = nodes("x: y");
        assert_eq!(out.len(), 1);
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr, Expr::new("x: y"));
        assert_eq!(rule.term, None);
        assert_eq!(rule.after_term, None);
        assert_eq!(final_state("x: y"), ParserState::AfterRule);
    }

    #[test]
    fn colon_equals_assignment() {
        let out = nodes("x := y");
        assert_eq!(out.len(), 1);
        let assign = expect_assign(&out[0]);
        assert_eq!(assign.op, AssignOp::ColonEq);
        assert_eq!(assign.lhs, Expr::new("x"));
        assert_eq!(assign.rhs, Expr::new("y"));
        assert_eq!(assign.directive, AssignDirective::None);
        assert_eq!(final_state("x := y"), ParserState::NotAfterRule);
    }

    #[test]
    fn assignment_operators() {
        let cases = [
            ("A = 1", AssignOp::Eq, "A"),
            ("A += 1", AssignOp::PlusEq, "A"),
            ("A ?= 1", AssignOp::QuestionEq, "A"),
            ("A:=1", AssignOp::ColonEq, "A"),
            ("A=1", AssignOp::Eq, "A"),
        ];
        for (input, op, lhs) in cases {
            let out = nodes(input);
            let assign = expect_assign(&out[0]);
            assert_eq!(assign.op, op, "input {:?}", input);
            assert_eq!(assign.lhs.text, lhs, "input {:?}", input);
            assert_eq!(assign.rhs.text, "1", "input {:?}", input);
        }
    }

    #[test]
    fn assignment_rhs_is_only_left_trimmed() {
        let out = nodes("A =  b c  ");
        let assign = expect_assign(&out[0]);
        assert_eq!(assign.rhs.text, "b c  ");
        assert!(!assign.rhs.is_command);
    }

    #[test]
    fn assignment_rhs_may_contain_colon() {
        let out = nodes("PATH_LIST = a:b:c");
        let assign = expect_assign(&out[0]);
        assert_eq!(assign.lhs.text, "PATH_LIST");
        assert_eq!(assign.rhs.text, "a:b:c");
    }

    #[test]
    fn colon_equals_with_empty_value() {
        let out = nodes("x:=");
        let assign = expect_assign(&out[0]);
        assert_eq!(assign.op, AssignOp::ColonEq);
        assert_eq!(assign.rhs.text, "");
    }

    #[test]
    fn operator_without_name_is_accepted() {
        // Only a separator at offset zero is rejected.
        let out = nodes(":= foo");
        let assign = expect_assign(&out[0]);
        assert_eq!(assign.op, AssignOp::ColonEq);
        assert_eq!(assign.lhs.text, "");
    }

    #[test]
    fn rule_with_inline_recipe() {
        let out = nodes("x: y; echo hi");
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr, Expr::new("x: y"));
        assert_eq!(rule.term, Some(RuleTerm::Semicolon));
        assert_eq!(rule.after_term, Some(Expr::command("echo hi")));
    }

    #[test]
    fn rule_with_target_specific_variable() {
        let out = nodes("x: CFLAGS = -O2");
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr, Expr::new("x: CFLAGS"));
        assert_eq!(rule.term, Some(RuleTerm::Equals));
        assert_eq!(rule.after_term, Some(Expr::new("-O2")));
        assert_eq!(final_state("x: CFLAGS = -O2"), ParserState::AfterRule);
    }

    #[test]
    fn rule_without_separator() {
        let out = nodes("  foo bar  ");
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr, Expr::new("foo bar"));
        assert_eq!(rule.term, None);
        assert_eq!(final_state("foo bar"), ParserState::MaybeAfterRule);
    }

    #[test]
    fn rule_without_separator_but_semicolon() {
        let out = nodes("foo; bar");
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr, Expr::new("foo"));
        assert_eq!(rule.term, Some(RuleTerm::Semicolon));
        assert_eq!(rule.after_term, Some(Expr::command("bar")));
        assert_eq!(final_state("foo; bar"), ParserState::MaybeAfterRule);
    }

    #[test]
    fn double_colon_rule() {
        let out = nodes("a:: b");
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr.text, "a:: b");
        assert_eq!(rule.term, None);
    }

    #[test]
    fn whitespace_only_line_is_empty_rule() {
        let out = nodes("   ");
        let rule = expect_rule(&out[0]);
        assert_eq!(rule.expr.text, "");
        assert_eq!(final_state("   "), ParserState::MaybeAfterRule);
    }

    #[test]
    fn recipe_commands_follow_rule() {
        let input = "x:\n\tcmd1\n\tcmd2\n";
        let config = ParserConfig::default();
        let mut parser = Parser::new(input, "Makefile", &VerbatimBuilder, &config);
        let mut out = Vec::new();
        parser.parse(&mut out).unwrap();

        assert_eq!(out.len(), 3);
        assert!(out[0].is_rule());
        assert_eq!(expect_command(&out[1]).expr, Expr::command("cmd1"));
        assert_eq!(expect_command(&out[2]).expr, Expr::command("cmd2"));
        assert_eq!(parser.state(), ParserState::AfterRule);
    }

    #[test]
    fn command_state_is_unchanged_line_by_line() {
        let config = ParserConfig::default();
        let mut out = Vec::new();
        let mut prefix = String::new();
        for (line, expected) in [
            ("x:\n", ParserState::AfterRule),
            ("\tcmd1\n", ParserState::AfterRule),
            ("\tcmd2\n", ParserState::AfterRule),
        ] {
            prefix.push_str(line);
            let mut parser = Parser::new(&prefix, "Makefile", &VerbatimBuilder, &config);
            out.clear();
            parser.parse(&mut out).unwrap();
            assert_eq!(parser.state(), expected);
        }
    }

    #[test]
    fn commands_after_maybe_rule() {
        let out = nodes("foo\n\tbar\n");
        assert_eq!(out.len(), 2);
        assert_eq!(expect_command(&out[1]).expr, Expr::command("bar"));
    }

    #[test]
    fn tab_line_after_assignment_is_not_command() {
        let out = nodes("A = 1\n\tfoo\n");
        assert_eq!(out.len(), 2);
        assert!(out[0].is_assign());
        let rule = expect_rule(&out[1]);
        assert_eq!(rule.expr.text, "foo");
        assert!(!rule.expr.is_command);
    }

    #[test]
    fn tab_line_after_assignment_can_be_assignment() {
        let out = nodes("x:\nA = 1\n\tB = 2\n");
        assert_eq!(out.len(), 3);
        let assign = expect_assign(&out[2]);
        assert_eq!(assign.lhs.text, "B");
    }

    #[test]
    fn tab_line_at_start_is_not_command() {
        let out = nodes("\techo hi\n");
        assert_eq!(out.len(), 1);
        assert!(out[0].is_rule());
    }

    #[test]
    fn assignment_between_rules_resets_state() {
        let out = nodes("a: b\n\tcmd\nV = 1\n\tnot-a-command\nc: d\n\tcmd2\n");
        let kinds: Vec<_> = out.iter().map(Ast::kind_name).collect();
        assert_eq!(
            kinds,
            vec!["rule", "command", "assign", "rule", "rule", "command"]
        );
    }

    #[test]
    fn empty_variable_name_fails() {
        let mut out = Vec::new();
        let error = parse("=value", "Makefile", &mut out).unwrap_err();
        assert!(matches!(error, ParseError::EmptyVariableName { .. }));
        assert_eq!(error.to_string(), "Makefile:1: *** empty variable name ***");
        assert!(out.is_empty());
    }

    #[test]
    fn error_keeps_earlier_nodes_and_stops() {
        let mut out = Vec::new();
        let error = parse("A = 1\n\n=value\nB = 2\n", "Makefile", &mut out).unwrap_err();
        assert_eq!(error.line(), 3);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_assign());
    }

    #[test]
    fn continuation_lines_are_kept_verbatim() {
        let out = nodes("SRCS = a.c \\\n\tb.c\nall: $(SRCS)\n");
        assert_eq!(out.len(), 2);
        let assign = expect_assign(&out[0]);
        assert_eq!(assign.rhs.text, "a.c \\\n\tb.c");
        assert!(out[1].is_rule());
    }

    #[test]
    fn continued_recipe_line_is_one_command() {
        let out = nodes("x:\n\techo a \\\n\techo b\n");
        assert_eq!(out.len(), 2);
        assert_eq!(expect_command(&out[1]).expr.text, "echo a \\\n\techo b");
    }

    #[test]
    fn crlf_input() {
        let out = nodes("x: y\r\n\tcmd\r\nA = 1\r\n");
        assert_eq!(out.len(), 3);
        assert_eq!(expect_rule(&out[0]).expr.text, "x: y");
        // Commands are kept verbatim, including the carriage return.
        assert_eq!(expect_command(&out[1]).expr.text, "cmd\r");
        assert_eq!(expect_assign(&out[2]).rhs.text, "1\r");
    }

    #[test]
    fn line_numbers_name_first_physical_line() {
        let out = nodes("A = 1\n\nx: y\n\tcmd\nB = 2 \\\n 3\nC = 4");
        let lines: Vec<_> = out.iter().map(|ast| ast.loc().lineno).collect();
        assert_eq!(lines, vec![1, 3, 3, 5, 7]);
        assert!(out.iter().all(|ast| &*ast.loc().filename == "Makefile"));
    }

    #[test]
    fn command_loc_is_owning_rule() {
        let out = nodes("\n\nall:\n\n\ttrue\n");
        assert_eq!(out[0].loc().lineno, 3);
        assert_eq!(out[1].loc().lineno, 3);
    }

    #[test]
    fn start_line_offsets_locations() {
        let config = ParserConfig::new().with_start_line(10);
        let mut out = Vec::new();
        parse_with("A = 1\nB = 2\n", "eval", &VerbatimBuilder, &config, &mut out).unwrap();
        assert_eq!(out[0].loc().lineno, 10);
        assert_eq!(out[1].loc().lineno, 11);
    }

    #[test]
    fn fixed_lineno_keeps_start_line() {
        let config = ParserConfig::new().with_start_line(42).with_fixed_lineno(true);
        let mut out = Vec::new();
        parse_with("A = 1\nB = 2\n\nC = 3\n", "eval", &VerbatimBuilder, &config, &mut out)
            .unwrap();
        assert!(out.iter().all(|ast| ast.loc().lineno == 42));
    }

    #[test]
    fn directives_fall_through_by_default() {
        let out = nodes("include foo.mk\nexport A = 1\nifeq ($(A),1)\nendif\n");
        assert_eq!(out.len(), 4);
        assert_eq!(expect_rule(&out[0]).expr.text, "include foo.mk");
        assert_eq!(expect_assign(&out[1]).lhs.text, "export A");
        assert_eq!(expect_rule(&out[2]).expr.text, "ifeq ($(A),1)");
        assert_eq!(expect_rule(&out[3]).expr.text, "endif");
    }

    #[test]
    fn directives_rejected_when_configured() {
        let config = ParserConfig::reject_directives();
        let mut out = Vec::new();
        let error = parse_with(
            "A = 1\ninclude foo.mk\n",
            "Makefile",
            &VerbatimBuilder,
            &config,
            &mut out,
        )
        .unwrap_err();
        assert_eq!(
            error,
            ParseError::unsupported_directive("include", Loc::new("Makefile", 2))
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn reject_policy_still_allows_commands() {
        // Recipe lines are never directive lines.
        let config = ParserConfig::reject_directives();
        let mut out = Vec::new();
        parse_with(
            "all:\n\texport A=1; include x\n",
            "Makefile",
            &VerbatimBuilder,
            &config,
            &mut out,
        )
        .unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn config_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.start_line, 1);
        assert!(!config.fixed_lineno);
        assert_eq!(config.directives, DirectivePolicy::FallThrough);
        assert_eq!(
            ParserConfig::new()
                .with_directive_policy(DirectivePolicy::Reject)
                .directives,
            DirectivePolicy::Reject
        );
    }

    #[test]
    fn injected_builder_sees_segments_and_context() {
        let builder = |text: &str, is_command: bool| (text.to_owned(), is_command);
        let config = ParserConfig::default();
        let mut out = Vec::new();
        parse_with(
            "CC ?= cc\nall: main.o; $(CC) -o $@ $^\n\techo done\n",
            "Makefile",
            &builder,
            &config,
            &mut out,
        )
        .unwrap();

        assert_eq!(out.len(), 3);
        match &out[0] {
            Ast::Assign(assign) => {
                assert_eq!(assign.lhs, ("CC".to_owned(), false));
                assert_eq!(assign.rhs, ("cc".to_owned(), false));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
        match &out[1] {
            Ast::Rule(rule) => {
                assert_eq!(rule.expr, ("all: main.o".to_owned(), false));
                assert_eq!(
                    rule.after_term,
                    Some(("$(CC) -o $@ $^".to_owned(), true))
                );
            }
            other => panic!("Expected rule, got {:?}", other),
        }
        match &out[2] {
            Ast::Command(command) => assert_eq!(command.expr, ("echo done".to_owned(), true)),
            other => panic!("Expected command, got {:?}", other),
        }
    }

    #[test]
    fn parsing_is_repeatable() {
        let input = "CC = gcc\nall: a b; @echo $@\n\t$(CC) -c x.c \\\n\t  -o x.o\nx ?= 1\n";
        assert_eq!(nodes(input), nodes(input));
    }

    #[test]
    fn parse_makefile_collects_nodes() {
        let result = parse_makefile("A = 1\nall:\n\ttrue\n", "Makefile");
        assert!(result.is_ok());
        assert_eq!(result.ast.filename, "Makefile");
        assert_eq!(result.ast.len(), 3);
        assert_eq!(result.ast.commands().count(), 1);
    }

    #[test]
    fn parse_makefile_keeps_partial_nodes_on_error() {
        let result = parse_makefile("A = 1\n= 2\n", "Makefile");
        assert!(result.has_errors());
        assert_eq!(result.ast.len(), 1);
        assert_eq!(result.error.map(|e| e.line()), Some(2));
    }

    #[test]
    fn parse_makefile_with_config_rejects_directives() {
        let result =
            parse_makefile_with_config("vpath %.c src\n", "Makefile", &ParserConfig::reject_directives());
        assert!(matches!(
            result.error,
            Some(ParseError::UnsupportedDirective { ref directive, .. }) if directive == "vpath"
        ));
    }

    /// Every string over the separator alphabet, up to five characters,
    /// parses without panicking, and commands never directly follow an
    /// assignment.
    #[test]
    fn exhaustive_short_inputs_never_panic() {
        const ALPHABET: [char; 9] = ['a', ':', '=', ';', '\t', '\\', '\n', '+', ' '];
        let mut input = String::new();

        for len in 1..=5u32 {
            for mut index in 0..ALPHABET.len().pow(len) {
                input.clear();
                for _ in 0..len {
                    input.push(ALPHABET[index % ALPHABET.len()]);
                    index /= ALPHABET.len();
                }

                let mut out = Vec::new();
                match parse(&input, "fuzz", &mut out) {
                    Ok(()) => {}
                    Err(ParseError::EmptyVariableName { .. }) => {}
                    Err(other) => panic!("unexpected error {:?} for {:?}", other, input),
                }
                for pair in out.windows(2) {
                    assert!(
                        !(pair[0].is_assign() && pair[1].is_command()),
                        "command after assignment for {:?}",
                        input
                    );
                }
            }
        }
    }
}
