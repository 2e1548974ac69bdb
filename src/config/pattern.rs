//! `applies_to` glob patterns
//!
//! Patterns are matched against POSIX-style paths relative to the directory
//! of the configuration file that declares them. `**` spans whole path
//! segments, `*` never crosses a `/`. A leading `./` is ignored.

use crate::types::{ConfigError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path};

#[derive(Debug, Clone)]
pub struct PathPattern {
    matcher: GlobMatcher,
}

impl PathPattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern.trim_start_matches("./"))
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern(pattern.to_string(), e.to_string()))?;

        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    /// Check whether the whole relative path matches
    pub fn matches(&self, relative_path: &str) -> bool {
        self.matcher.is_match(relative_path)
    }
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
