//! CLI module for mkparse.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support. Every option can also be set through a
//! `MKPARSE_*` variable.

pub mod config;
pub mod files;
pub mod output;

use clap::Parser;
use mkparse_core::DiscoveryConfig;
use std::path::PathBuf;

/// Makefile scanner - parses makefiles into rules, assignments and commands.
///
/// Reads each makefile given on the command line (or the makefile of each
/// directory) and reports the nodes found, or the first error of each file.
#[derive(Parser, Debug)]
#[command(name = "mkparse")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Makefiles or directories to parse.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Collect every makefile (and `*.mk` file) below directory arguments.
    #[arg(long, short = 'r', env = "MKPARSE_RECURSIVE")]
    pub recursive: bool,

    /// Descend into hidden directories when collecting makefiles.
    #[arg(long, env = "MKPARSE_INCLUDE_HIDDEN")]
    pub include_hidden: bool,

    /// Skip files ignored by `.gitignore` when collecting makefiles.
    #[arg(long, env = "MKPARSE_GITIGNORE")]
    pub gitignore: bool,

    /// Comma-separated glob patterns of paths to skip when collecting makefiles.
    #[arg(long, env = "MKPARSE_EXCLUDE", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Report lines starting with a make directive as errors instead of
    /// classifying them as rules or assignments.
    #[arg(long, env = "MKPARSE_REJECT_DIRECTIVES")]
    pub reject_directives: bool,

    /// Print every parsed node, not just the per-file summary.
    #[arg(long, short = 'd')]
    pub dump: bool,

    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns the exclude patterns (empty by default).
    pub fn effective_exclude(&self) -> Vec<String> {
        self.exclude.clone().unwrap_or_default()
    }

    /// Builds the discovery configuration used for directory arguments.
    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig::new()
            .with_hidden(self.include_hidden)
            .with_gitignore(self.gitignore)
            .with_exclude(self.effective_exclude())
    }
}
