use serde::{Deserialize, Serialize};

use crate::errors::{Result, VarsetXError};
use crate::model::{EditNode, NodeRef};

/// Mutable access to an edit chain
///
/// Production hosts implement this over their procedural graph. References
/// that are not nodes of the store (such as the root input) are external
/// inputs; the store does not own them.
pub trait ChainStore {
    /// The node currently designated as the chain's result
    fn active_output(&self) -> Option<NodeRef>;

    /// Move the active output pointer; `None` clears it
    ///
    /// # Errors
    /// * `ChainMutationFailed` - If the store refuses the change
    fn set_active_output(&mut self, node: Option<NodeRef>) -> Result<()>;

    /// Insert a fully described node
    ///
    /// # Errors
    /// * `DuplicateNodeName` - If the name or id is already taken
    /// * `ChainMutationFailed` - If the store refuses the insertion
    fn create_edit_node(&mut self, node: EditNode) -> Result<NodeRef>;

    /// Every node reference held by the store
    fn all_nodes(&self) -> Vec<NodeRef>;

    /// Look up a node
    fn node(&self, id: &NodeRef) -> Option<&EditNode>;

    /// Remove a node and return it
    ///
    /// # Errors
    /// * `EditNodeNotFound` - If the node is not in the store
    /// * `ChainMutationFailed` - If the store refuses the removal
    fn remove_node(&mut self, id: &NodeRef) -> Result<EditNode>;

    /// Rewire a node's single input
    ///
    /// # Errors
    /// * `EditNodeNotFound` - If the node is not in the store
    /// * `ChainMutationFailed` - If the store refuses the change
    fn set_upstream(&mut self, id: &NodeRef, upstream: Option<NodeRef>) -> Result<()>;

    /// Check whether a reference is a node of this store
    fn contains(&self, id: &NodeRef) -> bool {
        self.node(id).is_some()
    }

    /// Display names in use, in store order
    fn node_names(&self) -> Vec<String> {
        self.all_nodes()
            .iter()
            .filter_map(|id| self.node(id).map(|n| n.name.clone()))
            .collect()
    }
}

/// In-memory edit chain
///
/// Nodes are kept in creation order. Not thread-safe; designed for the
/// single-threaded host event loop. A locked chain refuses every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryChain {
    nodes: Vec<EditNode>,
    active_output: Option<NodeRef>,
    #[serde(skip)]
    locked: bool,
}

impl InMemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain whose active output starts at the given input
    pub fn with_active_output(active: NodeRef) -> Self {
        Self {
            active_output: Some(active),
            ..Self::default()
        }
    }

    /// Refuse all further mutations until `unlock`
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = &EditNode> {
        self.nodes.iter()
    }

    fn ensure_unlocked(&self, action: &str) -> Result<()> {
        if self.locked {
            return Err(VarsetXError::ChainMutationFailed {
                reason: format!("chain is locked; cannot {}", action),
            });
        }
        Ok(())
    }

    fn position(&self, id: &NodeRef) -> Result<usize> {
        self.nodes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| VarsetXError::EditNodeNotFound {
                node_id: id.to_string(),
            })
    }
}

impl ChainStore for InMemoryChain {
    fn active_output(&self) -> Option<NodeRef> {
        self.active_output.clone()
    }

    fn set_active_output(&mut self, node: Option<NodeRef>) -> Result<()> {
        self.ensure_unlocked("set active output")?;
        self.active_output = node;
        Ok(())
    }

    fn create_edit_node(&mut self, node: EditNode) -> Result<NodeRef> {
        self.ensure_unlocked("create edit node")?;
        if self.nodes.iter().any(|n| n.name == node.name) {
            return Err(VarsetXError::DuplicateNodeName { name: node.name });
        }
        if self.contains(&node.id) {
            return Err(VarsetXError::ChainMutationFailed {
                reason: format!("node id {} already exists", node.id),
            });
        }
        let id = node.id.clone();
        self.nodes.push(node);
        Ok(id)
    }

    fn all_nodes(&self) -> Vec<NodeRef> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    fn node(&self, id: &NodeRef) -> Option<&EditNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    fn remove_node(&mut self, id: &NodeRef) -> Result<EditNode> {
        self.ensure_unlocked("remove edit node")?;
        let index = self.position(id)?;
        Ok(self.nodes.remove(index))
    }

    fn set_upstream(&mut self, id: &NodeRef, upstream: Option<NodeRef>) -> Result<()> {
        self.ensure_unlocked("rewire upstream")?;
        let index = self.position(id)?;
        self.nodes[index].upstream = upstream;
        Ok(())
    }
}
