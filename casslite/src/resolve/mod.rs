//! Glob-based resource resolution over filesystem and archive roots.
//!
//! A resolver expands one pattern against a fixed list of roots into a
//! deterministic, duplicate-free, sorted list of resource locations. A root
//! that is missing, unreadable or corrupt contributes nothing; it never
//! aborts resolution of the remaining roots.

mod archive;
mod location;
mod pattern;

pub use location::{ResourceLocation, ResourceSource, TextEncoding};
pub use pattern::GlobPattern;

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::CassliteResult;

/// A place resources are looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionRoot {
    /// Plain directory on the local filesystem.
    Directory(PathBuf),
    /// Tar or tar.gz archive, opened as a scoped view per resolution call.
    Archive(PathBuf),
}

impl fmt::Display for ResolutionRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionRoot::Directory(path) => write!(f, "{}", path.display()),
            ResolutionRoot::Archive(path) => write!(f, "{}!/", path.display()),
        }
    }
}

/// Resolves glob patterns to sorted sets of resource locations.
#[derive(Debug, Clone, Default)]
pub struct ResourceResolver {
    roots: Vec<ResolutionRoot>,
}

impl ResourceResolver {
    pub fn new(roots: Vec<ResolutionRoot>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[ResolutionRoot] {
        &self.roots
    }

    /// Resolve a pattern against every root, UTF-8 encoding.
    pub fn resolve(&self, pattern: &str) -> CassliteResult<Vec<ResourceLocation>> {
        self.resolve_with(pattern, TextEncoding::default())
    }

    /// Resolve a pattern against every root, attaching `encoding` to each
    /// location. The result is sorted ascending by canonical string form and
    /// contains no duplicates.
    ///
    /// The only error is a pattern that does not compile; root-level I/O
    /// problems are logged and the root yields nothing.
    pub fn resolve_with(
        &self,
        pattern: &str,
        encoding: TextEncoding,
    ) -> CassliteResult<Vec<ResourceLocation>> {
        let pattern = GlobPattern::parse(pattern)?;
        let mut found = BTreeSet::new();
        for root in &self.roots {
            match resolve_root(root, &pattern, encoding) {
                Ok(locations) => found.extend(locations),
                Err(err) => {
                    debug!(root = %root, pattern = pattern.as_str(), error = %err,
                        "resolution root skipped");
                }
            }
        }
        Ok(found.into_iter().collect())
    }
}

fn resolve_root(
    root: &ResolutionRoot,
    pattern: &GlobPattern,
    encoding: TextEncoding,
) -> io::Result<Vec<ResourceLocation>> {
    match root {
        ResolutionRoot::Directory(dir) => resolve_directory(dir, pattern, encoding),
        ResolutionRoot::Archive(path) => archive::resolve(path, pattern, encoding),
    }
}

fn resolve_directory(
    dir: &Path,
    pattern: &GlobPattern,
    encoding: TextEncoding,
) -> io::Result<Vec<ResourceLocation>> {
    if pattern.is_literal() {
        let candidate = dir.join(pattern.as_str());
        if candidate.is_file() {
            return Ok(vec![
                ResourceLocation::file(std::path::absolute(candidate)?).with_encoding(encoding),
            ]);
        }
        return Ok(Vec::new());
    }

    // Deepest fixed directory common to all matches; missing or non-directory
    // start locations contribute nothing.
    let start = dir.join(pattern.static_prefix());
    if !start.is_dir() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(&start) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "unreadable entry skipped");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let Some(relative) = relative.to_str() else {
            continue;
        };
        if pattern.matches(relative) {
            matches.push(
                ResourceLocation::file(std::path::absolute(entry.path())?)
                    .with_encoding(encoding),
            );
        }
    }
    Ok(matches)
}
