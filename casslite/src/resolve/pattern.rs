//! Glob pattern normalization, static-prefix splitting and compilation.

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{CassliteError, CassliteResult};

/// Characters that make a pattern (or pattern prefix) a wildcard pattern.
const WILDCARDS: [char; 4] = ['*', '?', '[', '{'];

/// A normalized glob pattern split into a static prefix and wildcard suffix.
///
/// Patterns are `/`-separated, carry no leading slash and match
/// case-sensitively:
///
/// | pattern | matches |
/// |---|---|
/// | `*.cql` | file name ending in `.cql`, one segment |
/// | `**.cql` | same, at any depth |
/// | `rol?s.cql` | single-character wildcard |
/// | `{roles,keyspace}.cql` | alternation |
/// | `home/*/roles.cql` | one wildcard segment |
/// | `home/**/roles.cql` | arbitrary depth |
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    prefix_len: usize,
    matcher: Option<GlobMatcher>,
}

impl GlobPattern {
    /// Normalize and compile a pattern. Wildcard-free patterns compile to a
    /// literal name lookup instead of a matcher.
    pub fn parse(pattern: &str) -> CassliteResult<Self> {
        let pattern = normalize(pattern);
        if !has_wildcard(&pattern) {
            let prefix_len = pattern.len();
            return Ok(Self {
                pattern,
                prefix_len,
                matcher: None,
            });
        }

        let glob = GlobBuilder::new(&expand_recursive(&pattern))
            .literal_separator(true)
            .build()
            .map_err(|e| CassliteError::Config(format!("invalid glob pattern {pattern:?}: {e}")))?;
        Ok(Self {
            prefix_len: static_prefix_len(&pattern),
            matcher: Some(glob.compile_matcher()),
            pattern,
        })
    }

    /// The normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// True when the pattern contains no wildcard and names a single resource.
    pub fn is_literal(&self) -> bool {
        self.matcher.is_none()
    }

    /// Longest wildcard-free leading segment sequence, the deepest fixed
    /// directory a walk can start from. Includes the trailing `/` and is the
    /// whole pattern for literal patterns.
    pub fn static_prefix(&self) -> &str {
        &self.pattern[..self.prefix_len]
    }

    /// Test a `/`-separated path relative to a resolution root.
    pub fn matches(&self, relative: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(relative),
            None => relative == self.pattern,
        }
    }
}

/// Collapse separators to `/`, drop repeats and the leading slash.
/// Normalizing twice yields the same string.
pub fn normalize(pattern: &str) -> String {
    let mut cleaned = pattern.trim().replace('\\', "/");
    while cleaned.contains("//") {
        cleaned = cleaned.replace("//", "/");
    }
    cleaned.trim_start_matches('/').to_string()
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARDS)
}

/// Trim trailing segments until the remaining prefix is wildcard-free.
fn static_prefix_len(pattern: &str) -> usize {
    let mut end = pattern.len();
    while end > 0 && has_wildcard(&pattern[..end]) {
        end = pattern[..end - 1].rfind('/').map_or(0, |i| i + 1);
    }
    end
}

/// Rewrite segments that mix `**` with other text, e.g. `**.cql`, into a
/// recursive component plus an in-segment star (`**/*.cql`). The glob
/// compiler only accepts `**` as a complete path component.
fn expand_recursive(pattern: &str) -> String {
    let mut segments = Vec::new();
    for segment in pattern.split('/') {
        if segment == "**" || !segment.contains("**") {
            segments.push(segment.to_string());
        } else {
            segments.push("**".to_string());
            segments.push(segment.replace("**", "*"));
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["/home//scripts/*.cql", "home\\scripts\\*.cql", "  a/b  "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
        assert_eq!(normalize("/home//scripts/*.cql"), "home/scripts/*.cql");
        assert_eq!(normalize("home\\scripts\\roles.cql"), "home/scripts/roles.cql");
    }

    #[test]
    fn literal_pattern_has_no_matcher() {
        let pattern = GlobPattern::parse("home/scripts/roles.cql").unwrap();
        assert!(pattern.is_literal());
        assert_eq!(pattern.static_prefix(), "home/scripts/roles.cql");
        assert!(pattern.matches("home/scripts/roles.cql"));
        assert!(!pattern.matches("home/scripts/roles.cql.bak"));
    }

    #[test]
    fn static_prefix_stops_at_first_wildcard_segment() {
        let cases = [
            ("home/scripts/*.cql", "home/scripts/"),
            ("home/**/roles.cql", "home/"),
            ("**.cql", ""),
            ("{roles,keyspace}.cql", ""),
            ("home/rol?s.cql", "home/"),
        ];
        for (raw, prefix) in cases {
            let pattern = GlobPattern::parse(raw).unwrap();
            assert_eq!(pattern.static_prefix(), prefix, "prefix of {raw:?}");
        }
    }

    #[test]
    fn star_stays_within_one_segment() {
        let pattern = GlobPattern::parse("*.cql").unwrap();
        assert!(pattern.matches("roles.cql"));
        assert!(!pattern.matches("home/roles.cql"));
    }

    #[test]
    fn double_star_crosses_segments() {
        let pattern = GlobPattern::parse("**.cql").unwrap();
        assert!(pattern.matches("roles.cql"));
        assert!(pattern.matches("home/scripts/roles.cql"));
        assert!(!pattern.matches("roles.txt"));
    }

    #[test]
    fn question_mark_matches_one_character() {
        let pattern = GlobPattern::parse("rol?s.cql").unwrap();
        assert!(pattern.matches("roles.cql"));
        assert!(!pattern.matches("rols.cql"));
        assert!(!pattern.matches("rolles.cql"));
    }

    #[test]
    fn alternation_matches_either_name() {
        let pattern = GlobPattern::parse("{roles,keyspace}.cql").unwrap();
        assert!(pattern.matches("roles.cql"));
        assert!(pattern.matches("keyspace.cql"));
        assert!(!pattern.matches("tables.cql"));
    }

    #[test]
    fn character_class_matches_range() {
        let pattern = GlobPattern::parse("v[12].cql").unwrap();
        assert!(pattern.matches("v1.cql"));
        assert!(pattern.matches("v2.cql"));
        assert!(!pattern.matches("v3.cql"));
    }

    #[test]
    fn single_segment_wildcard_requires_exact_depth() {
        let pattern = GlobPattern::parse("home/*/roles.cql").unwrap();
        assert!(pattern.matches("home/any/roles.cql"));
        assert!(!pattern.matches("home/a/b/roles.cql"));
    }

    #[test]
    fn arbitrary_depth_wildcard() {
        let pattern = GlobPattern::parse("home/**/roles.cql").unwrap();
        assert!(pattern.matches("home/a/roles.cql"));
        assert!(pattern.matches("home/a/b/c/roles.cql"));
    }

    #[test]
    fn unbalanced_alternation_is_a_config_error() {
        let err = GlobPattern::parse("{roles,keyspace.cql").unwrap_err();
        assert!(matches!(err, crate::errors::CassliteError::Config(_)));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let pattern = GlobPattern::parse("*.cql").unwrap();
        assert!(!pattern.matches("ROLES.CQL"));
    }
}
