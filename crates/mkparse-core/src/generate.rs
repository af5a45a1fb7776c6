//! Random makefile generation for benchmarking and testing.
//!
//! Uses the AST types directly so that the printed output always parses
//! back into the same kinds of nodes.
//!
//! Note: Generated ASTs have placeholder locations (line 0). Do not use
//! for operations that depend on accurate locations.

use crate::parse::{
    AssignAst, AssignDirective, AssignOp, Ast, CommandAst, Expr, Loc, Makefile, RuleAst, RuleTerm,
};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Configuration for generating makefiles.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of rules to generate.
    pub num_rules: usize,
    /// Number of variable assignments to generate.
    pub num_assignments: usize,
    /// Maximum recipe commands per rule (0 allows empty recipes only).
    pub max_commands_per_rule: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_rules: 100,
            num_assignments: 30,
            max_commands_per_rule: 3,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with the given number of rules.
    ///
    /// Assignments are set to ~30% of rules.
    pub fn new(num_rules: usize) -> Self {
        Self {
            num_rules,
            num_assignments: num_rules * 3 / 10,
            ..Default::default()
        }
    }

    /// Small fixture (~10 rules).
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Medium fixture (~100 rules).
    pub fn medium() -> Self {
        Self::new(100)
    }

    /// Large fixture (~1000 rules).
    pub fn large() -> Self {
        Self::new(1_000)
    }

    /// Extra large fixture (~10k rules).
    pub fn xlarge() -> Self {
        Self::new(10_000)
    }

    /// Generate a file targeting approximately the given byte size.
    pub fn target_bytes(bytes: usize) -> Self {
        // A rule with its recipe averages ~80 bytes
        Self::new(bytes.saturating_div(80).max(1))
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of assignments explicitly.
    pub fn with_assignments(mut self, num_assignments: usize) -> Self {
        self.num_assignments = num_assignments;
        self
    }

    /// Set the maximum commands per rule.
    pub fn with_max_commands(mut self, max: usize) -> Self {
        self.max_commands_per_rule = max;
        self
    }
}

/// Vocabulary for generating realistic makefiles.
mod vocabulary {
    pub const VARIABLES: &[&str] = &[
        "CC", "CXX", "CFLAGS", "LDFLAGS", "LIBS", "SRCS", "OBJS", "PREFIX", "DESTDIR", "V",
    ];
    pub const VALUES: &[&str] = &[
        "gcc",
        "-O2 -Wall",
        "$(SRCS:.c=.o)",
        "main.c util.c",
        "/usr/local",
        "-lm -lpthread",
        "$(shell pkg-config --libs zlib)",
    ];
    pub const TARGETS: &[&str] = &[
        "all", "clean", "install", "check", "main.o", "util.o", "lib.a", "docs", "dist",
    ];
    pub const PREREQUISITES: &[&str] = &["main.c", "util.h", "$(OBJS)", "lib.a", "config.h"];
    pub const COMMANDS: &[&str] = &[
        "$(CC) $(CFLAGS) -c -o $@ $<",
        "$(CC) -o $@ $^ $(LDFLAGS) $(LIBS)",
        "@echo Building $@",
        "rm -f $(OBJS) all",
        "install -m 755 all $(DESTDIR)$(PREFIX)/bin",
        "$(AR) rcs $@ $^",
    ];
}

/// Probability of an inline `;` recipe on a rule (percentage).
const INLINE_RECIPE_PROBABILITY: u32 = 10;

/// Probability of a target-specific variable rule (percentage).
const TARGET_VARIABLE_PROBABILITY: u32 = 5;

/// Placeholder location for generated AST nodes.
fn placeholder_loc() -> Loc {
    Loc::new("<generated>", 0)
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn generate_assign(rng: &mut StdRng) -> Ast {
    use vocabulary::*;

    let op = match rng.random_range(0..4) {
        0 => AssignOp::Eq,
        1 => AssignOp::ColonEq,
        2 => AssignOp::PlusEq,
        _ => AssignOp::QuestionEq,
    };
    Ast::Assign(AssignAst {
        lhs: Expr::new(pick(rng, VARIABLES)),
        rhs: Expr::new(pick(rng, VALUES)),
        op,
        directive: AssignDirective::None,
        loc: placeholder_loc(),
    })
}

fn generate_rule(rng: &mut StdRng) -> Ast {
    use vocabulary::*;

    let target = pick(rng, TARGETS);
    let num_prereqs = rng.random_range(0..=3);
    let prereqs: Vec<&str> = (0..num_prereqs).map(|_| pick(rng, PREREQUISITES)).collect();
    let mut expr = format!("{}:", target);
    if !prereqs.is_empty() {
        expr.push(' ');
        expr.push_str(&prereqs.join(" "));
    }

    let (term, after_term) = if rng.random_ratio(INLINE_RECIPE_PROBABILITY, 100) {
        (
            Some(RuleTerm::Semicolon),
            Some(Expr::command(pick(rng, COMMANDS))),
        )
    } else if rng.random_ratio(TARGET_VARIABLE_PROBABILITY, 100) {
        expr = format!("{}: {}", target, pick(rng, VARIABLES));
        (Some(RuleTerm::Equals), Some(Expr::new(pick(rng, VALUES))))
    } else {
        (None, None)
    };

    Ast::Rule(RuleAst {
        expr: Expr::new(expr),
        term,
        after_term,
        loc: placeholder_loc(),
    })
}

/// Generates a random makefile AST based on configuration.
pub fn generate_ast(config: &GeneratorConfig) -> Makefile {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let capacity = config.num_assignments + config.num_rules * (config.max_commands_per_rule + 1);
    let mut asts = Vec::with_capacity(capacity);

    // Assignments first, like most hand-written makefiles
    for _ in 0..config.num_assignments {
        asts.push(generate_assign(&mut rng));
    }

    for _ in 0..config.num_rules {
        asts.push(generate_rule(&mut rng));
        let num_commands = rng.random_range(0..=config.max_commands_per_rule);
        for _ in 0..num_commands {
            asts.push(Ast::Command(CommandAst {
                expr: Expr::command(pick(&mut rng, vocabulary::COMMANDS)),
                loc: placeholder_loc(),
            }));
        }
    }

    Makefile::new("<generated>", asts)
}

/// Generates a makefile as a string.
pub fn generate(config: &GeneratorConfig) -> String {
    generate_ast(config).to_string()
}
