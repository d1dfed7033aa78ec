//! On-disk edit chain
//!
//! Stands in for a host graph between CLI runs: the root input reference and
//! the chain store serialized together as one JSON document.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use varsetx_core::model::NodeRef;
use varsetx_core::ops::InMemoryChain;

pub const DEFAULT_CHAIN_FILE: &str = "varsetx-chain.json";
pub const DEFAULT_ROOT_INPUT: &str = "scene_input";

#[derive(Debug, Serialize, Deserialize)]
pub struct ChainFile {
    pub root_input: NodeRef,
    pub chain: InMemoryChain,
}

impl ChainFile {
    /// Fresh chain whose active output is the root input
    pub fn new() -> Self {
        let root_input = NodeRef::new(DEFAULT_ROOT_INPUT);
        Self {
            chain: InMemoryChain::with_active_output(root_input.clone()),
            root_input,
        }
    }

    /// Read the chain file, or start fresh when it does not exist
    pub fn load_or_new(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no chain file; starting fresh");
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading chain file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing chain file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing chain file {}", path.display()))?;
        tracing::debug!(path = %path.display(), nodes = self.chain.len(), "chain file saved");
        Ok(())
    }
}

impl Default for ChainFile {
    fn default() -> Self {
        Self::new()
    }
}

pub fn chain_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(DEFAULT_CHAIN_FILE))
}
