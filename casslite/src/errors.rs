//! Error types for the bootstrap subsystem.
//!
//! Every fatal failure carries the identifier it failed on (pattern, port
//! range, or file path) in its message. Per-root resolution problems are not
//! errors at all: they are logged and the root contributes nothing.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type CassliteResult<T> = Result<T, CassliteError>;

/// Errors surfaced by the bootstrap subsystem.
#[derive(Debug, Error)]
pub enum CassliteError {
    /// Malformed version text. Never recovered.
    #[error("version: {0}")]
    Version(String),

    /// A resource explicitly matched by a pattern failed to read.
    #[error("resource: {0}")]
    Resource(String),

    /// No free port was found within the attempt budget.
    #[error("ports: {0}")]
    Ports(String),

    /// A directory initializer failed to stage a file; the rest of the
    /// chain was aborted.
    #[error("init: {0}")]
    Init(String),

    /// Invalid configuration, e.g. a glob pattern that does not compile.
    #[error("config: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_and_detail() {
        let err = CassliteError::Ports("no available port in the range [1, 2]".into());
        assert_eq!(
            err.to_string(),
            "ports: no available port in the range [1, 2]"
        );

        let err = CassliteError::Version("cannot parse \"q\"".into());
        assert!(err.to_string().starts_with("version: "));
    }
}
