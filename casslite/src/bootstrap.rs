//! Single-node bootstrap pipeline.
//!
//! Sequential stages, first failure aborts the rest:
//!
//! ```text
//! Layout ──→ Stage ──→ Scripts ──→ Ports
//! ```
//!
//! 1. **Layout** creates the working-directory skeleton.
//! 2. **Stage** runs the directory initializer chain in registration order.
//! 3. **Scripts** resolves the glob patterns and aggregates CQL statements.
//! 4. **Ports** draws the node's listen ports from the allocator.
//!
//! The resulting [`BootstrapPlan`] is everything an external process
//! launcher needs; launching and lifecycle are not this crate's concern.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::CassliteResult;
use crate::options::BootstrapOptions;
use crate::ports::PortAllocator;
use crate::resolve::ResourceResolver;
use crate::script::ScriptBundle;
use crate::workdir::{
    ConfigFileInitializer, DirectoryInitializer, InitChain, NodeLayout, RackdcFileInitializer,
    TopologyFileInitializer,
};

/// Listen ports handed to the external launcher, each verified free at
/// allocation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodePorts {
    /// Inter-node storage port.
    pub storage: u16,
    /// Native transport (CQL) port.
    pub native: u16,
    /// Thrift RPC port.
    pub rpc: u16,
    /// JMX monitoring port.
    pub jmx: u16,
}

/// Output of a completed bootstrap.
#[derive(Clone, Debug)]
pub struct BootstrapPlan {
    /// Fully staged working directory.
    pub working_dir: PathBuf,
    /// Ports for the generated configuration.
    pub ports: NodePorts,
    /// CQL statements to run once the node answers, in execution order.
    pub statements: Vec<String>,
}

/// Stages a working directory and assembles a [`BootstrapPlan`].
pub struct Bootstrap {
    options: BootstrapOptions,
    chain: InitChain,
}

impl Bootstrap {
    /// Bootstrap with the default chain: cassandra.yaml, rackdc and topology
    /// staging, each a no-op unless the options name a source.
    pub fn new(options: BootstrapOptions) -> Self {
        let mut chain = InitChain::new();
        chain.add(ConfigFileInitializer::new(options.config_file.clone()));
        chain.add(RackdcFileInitializer::new(options.rackdc_file.clone()));
        chain.add(TopologyFileInitializer::new(options.topology_file.clone()));
        Self { options, chain }
    }

    /// Append a custom initializer; it runs after the default chain, in
    /// registration order.
    pub fn add_initializer(&mut self, initializer: impl DirectoryInitializer + 'static) -> &mut Self {
        self.chain.add(initializer);
        self
    }

    /// Run all stages and produce the plan.
    pub fn run(&self) -> CassliteResult<BootstrapPlan> {
        let layout = NodeLayout::new(self.options.working_dir.clone());
        layout.prepare()?;

        self.chain.run(layout.root(), &self.options.version)?;

        let statements = self.load_scripts()?;
        let ports = self.allocate_ports()?;

        info!(
            working_dir = %layout.root().display(),
            version = %self.options.version,
            statements = statements.len(),
            "bootstrap staged"
        );
        Ok(BootstrapPlan {
            working_dir: layout.root().to_path_buf(),
            ports,
            statements,
        })
    }

    fn load_scripts(&self) -> CassliteResult<Vec<String>> {
        let resolver = ResourceResolver::new(self.options.roots.clone());
        let mut statements = Vec::new();
        for pattern in &self.options.script_patterns {
            let locations = resolver.resolve(pattern)?;
            debug!(pattern, matches = locations.len(), "resolved script pattern");
            statements.extend(ScriptBundle::load(&locations)?.into_statements());
        }
        Ok(statements)
    }

    fn allocate_ports(&self) -> CassliteResult<NodePorts> {
        let allocator =
            PortAllocator::with_range(self.options.address, self.options.port_range.as_range());
        Ok(NodePorts {
            storage: allocator.next()?,
            native: allocator.next()?,
            rpc: allocator.next()?,
            jmx: allocator.next()?,
        })
    }
}
