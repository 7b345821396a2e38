//! casslite: embeddable Apache Cassandra bootstrap for automated tests.
//!
//! Prepares everything a test harness needs before launching a short-lived
//! node: an isolated working directory with staged configuration, a set of
//! verified-free listen ports, and the ordered CQL statements collected from
//! glob-resolved script resources. Launching and driving the node itself is
//! left to the embedding harness.
//!
//! ```no_run
//! use casslite::{Bootstrap, BootstrapOptions, ResolutionRoot, Version};
//!
//! # fn main() -> casslite::CassliteResult<()> {
//! let mut options = BootstrapOptions::new(Version::parse("3.11.3")?, "/tmp/node0");
//! options.script_patterns = vec!["**.cql".into()];
//! options.roots = vec![ResolutionRoot::Directory("tests/scripts".into())];
//!
//! let plan = Bootstrap::new(options).run()?;
//! println!("native port: {}", plan.ports.native);
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod errors;
pub mod options;
pub mod ports;
pub mod resolve;
pub mod script;
pub mod version;
pub mod workdir;

pub use bootstrap::{Bootstrap, BootstrapPlan, NodePorts};
pub use errors::{CassliteError, CassliteResult};
pub use options::{BootstrapOptions, PortRange};
pub use ports::PortAllocator;
pub use resolve::{
    GlobPattern, ResolutionRoot, ResourceLocation, ResourceResolver, TextEncoding,
};
pub use script::ScriptBundle;
pub use version::Version;
pub use workdir::{DirectoryInitializer, InitChain, NodeLayout};
