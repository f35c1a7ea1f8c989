//! Output module
//!
//! On-disk layout of a run, row files, skew reports, the JSON run manifest and
//! the console summary.
//!
//! ```text
//! {output_dir}/{nodes}_{small}_{small_a}_{big}_{big_a}/
//! ├── t{N}_{a}.skew          global skew report per table
//! ├── manifest.json          optional
//! ├── 0/
//! │   ├── small              value,padding rows
//! │   ├── small.skew         value,local_count
//! │   ├── big
//! │   └── big.skew
//! └── 1/ ...
//! ```

pub mod json;
pub mod skew;
pub mod table;
pub mod text;

use crate::config::TableKind;
use crate::util::format::format_float;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of one run directory
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
}

impl RunLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the run directory and one directory per node
    pub fn create(&self, node_count: usize) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create run directory: {}", self.root.display()))?;
        for node_id in 0..node_count {
            let dir = self.node_dir(node_id);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create node directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Global skew report: `t{N}_{a}.skew`
    pub fn global_skew_path(&self, rows: usize, skew_degree: f64) -> PathBuf {
        self.root
            .join(format!("t{}_{}.skew", rows, format_float(skew_degree)))
    }

    pub fn node_dir(&self, node_id: usize) -> PathBuf {
        self.root.join(node_id.to_string())
    }

    /// Row file of one table on one node
    pub fn table_path(&self, node_id: usize, kind: TableKind) -> PathBuf {
        self.node_dir(node_id).join(kind.as_str())
    }

    /// Skew report of one table on one node
    pub fn shard_skew_path(&self, node_id: usize, kind: TableKind) -> PathBuf {
        self.node_dir(node_id).join(format!("{}.skew", kind.as_str()))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("manifest.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let layout = RunLayout::new("/data/4_1000_1.2_1000_1.0");

        assert_eq!(
            layout.global_skew_path(1000, 1.0),
            PathBuf::from("/data/4_1000_1.2_1000_1.0/t1000_1.0.skew")
        );
        assert_eq!(
            layout.table_path(2, TableKind::Small),
            PathBuf::from("/data/4_1000_1.2_1000_1.0/2/small")
        );
        assert_eq!(
            layout.shard_skew_path(0, TableKind::Big),
            PathBuf::from("/data/4_1000_1.2_1000_1.0/0/big.skew")
        );
    }

    #[test]
    fn test_layout_create() {
        let temp = TempDir::new().unwrap();
        let layout = RunLayout::new(temp.path().join("run"));
        layout.create(3).unwrap();

        for node_id in 0..3 {
            assert!(layout.node_dir(node_id).is_dir());
        }
        assert!(!layout.node_dir(3).exists());

        // Re-running into an existing directory is fine
        layout.create(3).unwrap();
    }
}
