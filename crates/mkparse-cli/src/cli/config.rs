//! Configuration handling for the CLI.
//!
//! This module converts CLI arguments into the library's configuration types
//! and resolves the command-line paths into the list of makefiles to parse.

use crate::cli::Args;
use mkparse_core::discover::DiscoveryError;
use mkparse_core::{DiscoveryConfig, ParserConfig, find_makefile, list_makefiles};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A path given on the command line does not exist.
    #[error("path '{0}' does not exist")]
    MissingPath(PathBuf),

    /// A directory has no makefile make would read.
    #[error(
        "no makefile found in '{0}'. Searched for: GNUmakefile, makefile, Makefile (use --recursive to collect *.mk files)"
    )]
    MakefileNotFound(PathBuf),

    /// Nothing to parse after resolving every path.
    #[error("no makefiles to parse")]
    NoMakefiles,

    /// Directory discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every file parsed successfully.
    Success = 0,
    /// Application startup failed (wrong configuration or internal error).
    StartupFailure = 1,
    /// Application terminated by signal (SIGINT/SIGTERM).
    Terminated = 2,
    /// At least one file could not be read or parsed.
    ParseFailed = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Validated and processed configuration for running the parser.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Makefiles to parse, in command-line order.
    pub files: Vec<PathBuf>,
    /// Configuration handed to the parser for every file.
    pub parser_config: ParserConfig,
    /// Whether to print every node.
    pub dump: bool,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let discovery = args.discovery_config();

        let mut files = Vec::new();
        for path in &args.paths {
            files.extend(resolve_path(path, args.recursive, &discovery)?);
        }
        if files.is_empty() {
            return Err(ConfigError::NoMakefiles);
        }

        let parser_config = if args.reject_directives {
            ParserConfig::reject_directives()
        } else {
            ParserConfig::default()
        };

        Ok(Self {
            files,
            parser_config,
            dump: args.dump,
            json_output: args.json,
        })
    }

    /// Determines the exit code based on parse results.
    pub fn exit_code_for_results(&self, has_failures: bool) -> ExitCode {
        if has_failures {
            ExitCode::ParseFailed
        } else {
            ExitCode::Success
        }
    }
}

/// Resolves one command-line path into the makefiles it names.
///
/// Files are taken as-is. A directory yields its makefile, or every
/// makefile below it when `recursive` is set.
pub fn resolve_path(
    path: &Path,
    recursive: bool,
    discovery: &DiscoveryConfig,
) -> Result<Vec<PathBuf>, ConfigError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(ConfigError::MissingPath(path.to_path_buf()));
    }

    if recursive {
        Ok(list_makefiles(path, discovery)?)
    } else {
        find_makefile(path)
            .map(|found| vec![found])
            .ok_or_else(|| ConfigError::MakefileNotFound(path.to_path_buf()))
    }
}
