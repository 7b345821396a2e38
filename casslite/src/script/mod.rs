//! Ordered CQL script aggregation.

mod statements;

pub use statements::split_statements;

use tracing::debug;

use crate::errors::CassliteResult;
use crate::resolve::ResourceLocation;

/// An ordered sequence of CQL statements aggregated from resolved resources.
///
/// Statement order is resource order first (the resolver's sort order), then
/// in-resource order; nothing is reordered or deduplicated across resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBundle {
    statements: Vec<String>,
}

impl ScriptBundle {
    /// Read every location in the given order and concatenate their
    /// statements.
    ///
    /// A failed read of any single location is fatal for the whole
    /// aggregation: a script that was explicitly matched must not be
    /// silently dropped.
    pub fn load(locations: &[ResourceLocation]) -> CassliteResult<Self> {
        let mut statements = Vec::new();
        for location in locations {
            let text = location.read_text()?;
            let mut parsed = split_statements(&text);
            debug!(location = %location, statements = parsed.len(), "loaded script");
            statements.append(&mut parsed);
        }
        Ok(Self { statements })
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}
