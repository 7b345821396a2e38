//! Working-directory layout for a single node.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{CassliteError, CassliteResult};

/// Directory structure constants
pub mod dirs {
    /// Configuration files (cassandra.yaml and friends)
    pub const CONF_DIR: &str = "conf";

    /// SSTables and system keyspaces
    pub const DATA_DIR: &str = "data";

    /// Commit log segments
    pub const COMMITLOG_DIR: &str = "commitlog";

    /// Server logs
    pub const LOGS_DIR: &str = "logs";
}

/// Filesystem layout of one staged node directory.
///
/// ```text
/// <working-dir>/
/// ├── conf/        # configuration staged by initializers
/// ├── data/        # SSTables
/// ├── commitlog/
/// └── logs/
/// ```
#[derive(Clone, Debug)]
pub struct NodeLayout {
    root: PathBuf,
}

impl NodeLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn conf_dir(&self) -> PathBuf {
        self.root.join(dirs::CONF_DIR)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(dirs::DATA_DIR)
    }

    pub fn commitlog_dir(&self) -> PathBuf {
        self.root.join(dirs::COMMITLOG_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(dirs::LOGS_DIR)
    }

    /// Create the directory skeleton.
    pub fn prepare(&self) -> CassliteResult<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| CassliteError::Init(format!("failed to create working directory: {e}")))?;

        fs::create_dir_all(self.conf_dir())
            .map_err(|e| CassliteError::Init(format!("failed to create conf dir: {e}")))?;

        fs::create_dir_all(self.data_dir())
            .map_err(|e| CassliteError::Init(format!("failed to create data dir: {e}")))?;

        fs::create_dir_all(self.commitlog_dir())
            .map_err(|e| CassliteError::Init(format!("failed to create commitlog dir: {e}")))?;

        fs::create_dir_all(self.logs_dir())
            .map_err(|e| CassliteError::Init(format!("failed to create logs dir: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_creates_the_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let layout = NodeLayout::new(dir.path().join("node0"));
        layout.prepare().unwrap();
        assert!(layout.conf_dir().is_dir());
        assert!(layout.data_dir().is_dir());
        assert!(layout.commitlog_dir().is_dir());
        assert!(layout.logs_dir().is_dir());
    }

    #[test]
    fn prepare_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = NodeLayout::new(dir.path().to_path_buf());
        layout.prepare().unwrap();
        layout.prepare().unwrap();
    }
}
