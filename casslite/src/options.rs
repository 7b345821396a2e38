//! Bootstrap configuration.

use std::net::{IpAddr, Ipv4Addr};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ports::DEFAULT_PORT_RANGE;
use crate::resolve::{ResolutionRoot, ResourceLocation};
use crate::version::Version;

/// Inclusive port range the allocator draws candidates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub min: u16,
    pub max: u16,
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            min: *DEFAULT_PORT_RANGE.start(),
            max: *DEFAULT_PORT_RANGE.end(),
        }
    }
}

impl PortRange {
    pub fn as_range(&self) -> RangeInclusive<u16> {
        self.min..=self.max
    }
}

/// Options for a single-node bootstrap.
///
/// Users create it with [`BootstrapOptions::new`] and modify fields as
/// needed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BootstrapOptions {
    /// Target Cassandra version, e.g. `3.11.3`.
    pub version: Version,

    /// Root of the staged working directory.
    pub working_dir: PathBuf,

    /// Glob patterns locating the CQL init scripts, resolved against
    /// `roots`. Patterns run in list order; matches of one pattern run in
    /// canonical-string order.
    #[serde(default)]
    pub script_patterns: Vec<String>,

    /// Places script patterns and staged files are looked up in.
    #[serde(default)]
    pub roots: Vec<ResolutionRoot>,

    /// Source for `conf/cassandra.yaml`. None keeps whatever the unpacked
    /// distribution ships.
    #[serde(default)]
    pub config_file: Option<ResourceLocation>,

    /// Source for `conf/cassandra-rackdc.properties`.
    #[serde(default)]
    pub rackdc_file: Option<ResourceLocation>,

    /// Source for `conf/cassandra-topology.properties`.
    #[serde(default)]
    pub topology_file: Option<ResourceLocation>,

    /// Address listeners are probed on. The external launcher is expected to
    /// bind the same address.
    #[serde(default = "default_address")]
    pub address: IpAddr,

    /// Range the node's listen ports are drawn from.
    #[serde(default)]
    pub port_range: PortRange,
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl BootstrapOptions {
    /// Options for `version` staged under `working_dir`, with no scripts, no
    /// staged files, loopback address and the default port range.
    pub fn new(version: Version, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            version,
            working_dir: working_dir.into(),
            script_patterns: Vec::new(),
            roots: Vec::new(),
            config_file: None,
            rackdc_file: None,
            topology_file: None,
            address: default_address(),
            port_range: PortRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_loopback_and_default_range() {
        let options = BootstrapOptions::new(Version::new(3, 11, 3), "/tmp/node0");
        assert_eq!(options.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(options.port_range, PortRange { min: 49152, max: 65535 });
        assert!(options.script_patterns.is_empty());
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let json = r#"{
            "version": "3.11.3",
            "working_dir": "/tmp/node0"
        }"#;
        let options: BootstrapOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.version, Version::new(3, 11, 3));
        assert_eq!(options.port_range, PortRange::default());
        assert!(options.topology_file.is_none());
    }

    #[test]
    fn serde_round_trips() {
        let mut options = BootstrapOptions::new(Version::new(4, 1, 4), "/tmp/node1");
        options.script_patterns = vec!["**.cql".into()];
        options.roots = vec![ResolutionRoot::Directory("/tmp/scripts".into())];

        let json = serde_json::to_string(&options).unwrap();
        let back: BootstrapOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, options.version);
        assert_eq!(back.script_patterns, options.script_patterns);
        assert_eq!(back.roots, options.roots);
    }
}
