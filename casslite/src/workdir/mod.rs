//! Working-directory staging: layout plus the ordered initializer chain.

mod initializers;
mod layout;

pub use initializers::{
    CONFIG_FILE, ConfigFileInitializer, RACKDC_FILE, RackdcFileInitializer, TOPOLOGY_FILE,
    TopologyFileInitializer,
};
pub use layout::{NodeLayout, dirs};

use std::path::Path;

use crate::errors::CassliteResult;
use crate::version::Version;

/// A single staging step run against the working directory before launch.
///
/// Initializers may read and overwrite arbitrary files beneath the working
/// directory. They are stateless across calls and identified only by their
/// position in the owning chain.
pub trait DirectoryInitializer {
    fn initialize(&self, directory: &Path, version: &Version) -> CassliteResult<()>;
}

impl<F> DirectoryInitializer for F
where
    F: Fn(&Path, &Version) -> CassliteResult<()>,
{
    fn initialize(&self, directory: &Path, version: &Version) -> CassliteResult<()> {
        self(directory, version)
    }
}

/// Ordered list of initializers.
///
/// Execution order equals registration order, always sequential; later
/// initializers may depend on files staged by earlier ones.
#[derive(Default)]
pub struct InitChain {
    initializers: Vec<Box<dyn DirectoryInitializer>>,
}

impl InitChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an initializer to the end of the chain.
    pub fn add(&mut self, initializer: impl DirectoryInitializer + 'static) -> &mut Self {
        self.initializers.push(Box::new(initializer));
        self
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }

    /// Run every initializer in order. The first failure aborts the rest and
    /// propagates; files already staged are left in place for diagnosis.
    pub fn run(&self, directory: &Path, version: &Version) -> CassliteResult<()> {
        for initializer in &self.initializers {
            initializer.initialize(directory, version)?;
        }
        Ok(())
    }
}
