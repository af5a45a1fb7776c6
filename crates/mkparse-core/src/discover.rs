//! Finding makefiles on disk.
//!
//! This module locates the makefile of a directory the way make does, and
//! walks directory trees collecting every makefile-like file.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names make looks for, in order.
pub const DEFAULT_MAKEFILES: &[&str] = &["GNUmakefile", "makefile", "Makefile"];

/// Errors that can occur while discovering makefiles.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// The underlying error.
        source: globset::Error,
    },
}

/// Configuration for makefile discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to descend into hidden files and directories (starting with `.`).
    /// Default: false
    pub include_hidden: bool,
    /// Whether to respect `.gitignore` rules (only works in git repos).
    /// Default: false
    pub respect_gitignore: bool,
    /// Glob patterns (relative to the root) of paths to skip.
    pub exclude: Vec<String>,
}

impl DiscoveryConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to include hidden files.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to respect .gitignore rules.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Sets the exclude patterns.
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }
}

/// Returns true if a file name looks like a makefile.
pub fn is_makefile_name(name: &str) -> bool {
    DEFAULT_MAKEFILES.contains(&name) || (name.ends_with(".mk") && name.len() > 3)
}

/// Finds the makefile make would read in `dir`.
///
/// Returns `Some(path)` if found, `None` otherwise.
pub fn find_makefile(dir: &Path) -> Option<PathBuf> {
    DEFAULT_MAKEFILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| DiscoveryError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| DiscoveryError::InvalidGlob {
        pattern: patterns.join(","),
        source,
    })
}

/// Lists makefiles below `root`, sorted by path.
pub fn list_makefiles(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    debug!(
        "Listing makefiles in {:?} (hidden={}, gitignore={}, exclude={:?})",
        root, config.include_hidden, config.respect_gitignore, config.exclude
    );
    let excludes = build_excludes(&config.exclude)?;

    let walker = WalkBuilder::new(root)
        .hidden(!config.include_hidden) // hidden(true) = skip hidden files
        .ignore(false)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .follow_links(false)
        .build();

    let mut found = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_makefile_name(name) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if excludes.is_match(relative) {
            trace!("Excluded {:?}", relative);
            continue;
        }
        found.push(path.to_path_buf());
    }

    found.sort();
    debug!("Found {} makefiles", found.len());
    Ok(found)
}
