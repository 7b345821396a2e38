//! File-staging initializers for the conf/ directory.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::DirectoryInitializer;
use super::layout::dirs;
use crate::errors::{CassliteError, CassliteResult};
use crate::resolve::ResourceLocation;
use crate::version::Version;

/// Canonical name of the topology snitch properties file.
pub const TOPOLOGY_FILE: &str = "cassandra-topology.properties";

/// Canonical name of the rack/datacenter snitch properties file.
pub const RACKDC_FILE: &str = "cassandra-rackdc.properties";

/// Canonical name of the main configuration file.
pub const CONFIG_FILE: &str = "cassandra.yaml";

/// Copy `source` over `conf/<file_name>`, replacing any existing file.
///
/// The bytes land in a temp file next to the destination first and are moved
/// into place with a rename, so the destination is never observed half
/// written.
fn stage(source: &ResourceLocation, directory: &Path, file_name: &str) -> CassliteResult<()> {
    let conf_dir = directory.join(dirs::CONF_DIR);
    let target = conf_dir.join(file_name);
    debug!(target = %target.display(), source = %source, "replacing staged file");

    let bytes = source
        .read_bytes()
        .map_err(|e| CassliteError::Init(format!("({source}) could not be read: {e}")))?;

    let mut staged = NamedTempFile::new_in(&conf_dir).map_err(|e| {
        CassliteError::Init(format!(
            "({source}) could not be saved to ({}): {e}",
            target.display()
        ))
    })?;
    staged.write_all(&bytes).map_err(|e| {
        CassliteError::Init(format!(
            "({source}) could not be saved to ({}): {e}",
            target.display()
        ))
    })?;
    staged.persist(&target).map_err(|e| {
        CassliteError::Init(format!(
            "({source}) could not be saved to ({}): {e}",
            target.display()
        ))
    })?;
    Ok(())
}

/// Stages `conf/cassandra-topology.properties` from an optional source.
///
/// Without a source this is a strict no-op: an existing or absent target file
/// is left untouched, and no file is ever created. With a source, the
/// target is replaced with the source bytes.
#[derive(Debug, Clone, Default)]
pub struct TopologyFileInitializer {
    source: Option<ResourceLocation>,
}

impl TopologyFileInitializer {
    pub fn new(source: Option<ResourceLocation>) -> Self {
        Self { source }
    }
}

impl DirectoryInitializer for TopologyFileInitializer {
    fn initialize(&self, directory: &Path, _version: &Version) -> CassliteResult<()> {
        match &self.source {
            Some(source) => stage(source, directory, TOPOLOGY_FILE),
            None => Ok(()),
        }
    }
}

/// Stages `conf/cassandra-rackdc.properties`; no-op without a source.
#[derive(Debug, Clone, Default)]
pub struct RackdcFileInitializer {
    source: Option<ResourceLocation>,
}

impl RackdcFileInitializer {
    pub fn new(source: Option<ResourceLocation>) -> Self {
        Self { source }
    }
}

impl DirectoryInitializer for RackdcFileInitializer {
    fn initialize(&self, directory: &Path, _version: &Version) -> CassliteResult<()> {
        match &self.source {
            Some(source) => stage(source, directory, RACKDC_FILE),
            None => Ok(()),
        }
    }
}

/// Stages `conf/cassandra.yaml`; no-op without a source.
#[derive(Debug, Clone, Default)]
pub struct ConfigFileInitializer {
    source: Option<ResourceLocation>,
}

impl ConfigFileInitializer {
    pub fn new(source: Option<ResourceLocation>) -> Self {
        Self { source }
    }
}

impl DirectoryInitializer for ConfigFileInitializer {
    fn initialize(&self, directory: &Path, _version: &Version) -> CassliteResult<()> {
        match &self.source {
            Some(source) => stage(source, directory, CONFIG_FILE),
            None => Ok(()),
        }
    }
}
