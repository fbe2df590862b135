//! Include/exclude glob filtering over workspace-relative paths.
//!
//! Patterns are matched against `/`-separated paths. `*` stays inside one
//! path segment; `**` spans any number of segments.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Error, PatternRole};

#[derive(Clone, Debug)]
struct CompiledPattern {
    source: String,
    matcher: GlobMatcher,
}

/// Ordered inclusion and exclusion patterns.
///
/// A path is eligible when it matches at least one inclusion and no
/// exclusion. With no inclusions registered nothing is eligible.
#[derive(Clone, Debug, Default)]
pub struct GlobFilterSet {
    includes: Vec<CompiledPattern>,
    excludes: Vec<CompiledPattern>,
}

impl GlobFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_include(&mut self, pattern: &str) -> Result<(), Error> {
        let compiled = compile(pattern, PatternRole::Inclusion)?;
        self.includes.push(compiled);
        Ok(())
    }

    pub fn add_exclude(&mut self, pattern: &str) -> Result<(), Error> {
        let compiled = compile(pattern, PatternRole::Exclusion)?;
        self.excludes.push(compiled);
        Ok(())
    }

    pub fn matches(&self, relative: &str) -> bool {
        if !self.includes.iter().any(|p| p.matcher.is_match(relative)) {
            tracing::debug!(path = relative, "not included");
            return false;
        }
        if let Some(pattern) = self.excludes.iter().find(|p| p.matcher.is_match(relative)) {
            tracing::debug!(path = relative, pattern = %pattern.source, "excluded");
            return false;
        }
        true
    }

    /// Like [`matches`](Self::matches), after converting host separators to `/`.
    pub fn matches_path(&self, relative: &Path) -> bool {
        let normalized = relative.to_string_lossy().replace('\\', "/");
        self.matches(&normalized)
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|p| p.source.as_str())
    }

    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(|p| p.source.as_str())
    }
}

fn compile(pattern: &str, role: PatternRole) -> Result<CompiledPattern, Error> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            role,
            source,
        })?;
    Ok(CompiledPattern {
        source: pattern.to_string(),
        matcher: glob.compile_matcher(),
    })
}
