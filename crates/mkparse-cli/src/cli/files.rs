//! Reading and parsing the selected makefiles.
//!
//! Each file is parsed on tokio's blocking pool. Parsers share nothing, so
//! files are independent; results come back in the order they were given.

use futures::future::join_all;
use mkparse_core::{ParseResult, ParserConfig, parse_makefile_with_config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, trace};

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was read and parsed (possibly with an error).
    Parsed(ParseResult),
    /// The file could not be read.
    Unreadable(std::io::Error),
}

/// The outcome of one makefile.
#[derive(Debug)]
pub struct FileReport {
    /// Path of the file.
    pub path: PathBuf,
    /// The parse result or the read error.
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Returns true if the file could not be read or parsed.
    pub fn has_failure(&self) -> bool {
        match &self.outcome {
            FileOutcome::Parsed(result) => result.has_errors(),
            FileOutcome::Unreadable(_) => true,
        }
    }

    /// Returns the parse result, if the file was read.
    pub fn parsed(&self) -> Option<&ParseResult> {
        match &self.outcome {
            FileOutcome::Parsed(result) => Some(result),
            FileOutcome::Unreadable(_) => None,
        }
    }

    /// Returns a message describing the failure, if any.
    pub fn failure_message(&self) -> Option<String> {
        match &self.outcome {
            FileOutcome::Parsed(result) => result.error.as_ref().map(ToString::to_string),
            FileOutcome::Unreadable(e) => Some(format!("failed to read file: {}", e)),
        }
    }
}

/// Reads and parses one makefile.
///
/// Invalid UTF-8 is replaced rather than rejected; make itself works on bytes.
pub fn parse_file(path: &Path, config: &ParserConfig) -> FileReport {
    let outcome = match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let filename = path.display().to_string();
            trace!("Read {} bytes from {}", bytes.len(), filename);
            FileOutcome::Parsed(parse_makefile_with_config(&text, &filename, config))
        }
        Err(e) => FileOutcome::Unreadable(e),
    };

    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Parses every file in parallel, returning reports in input order.
pub async fn parse_all(
    files: &[PathBuf],
    config: &ParserConfig,
) -> Result<Vec<FileReport>, JoinError> {
    debug!("Parsing {} file(s)", files.len());
    let config = Arc::new(config.clone());

    let tasks = files.iter().cloned().map(|path| {
        let config = Arc::clone(&config);
        tokio::task::spawn_blocking(move || parse_file(&path, &config))
    });

    join_all(tasks).await.into_iter().collect()
}
