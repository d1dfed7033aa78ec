use std::collections::HashSet;

use crate::errors::{Result, VarsetXError};
use crate::model::NodeRef;
use crate::ops::store::ChainStore;
use crate::traversal::upstream_path;

/// Validate the structural invariants of an edit chain
///
/// 1. Node names are unique
/// 2. No node's upstream walk revisits a node
/// 3. The active output, if set, is the root input or a node of the chain
/// 4. The active output's upstream walk terminates at the root input
///
/// Other sub-chains may hang off different inputs; only the active branch
/// is required to reach `root`.
///
/// # Errors
/// Returns the first violation found.
pub fn validate_chain<C: ChainStore + ?Sized>(chain: &C, root: Option<&NodeRef>) -> Result<()> {
    let mut names = HashSet::new();
    for name in chain.node_names() {
        if !names.insert(name.clone()) {
            return Err(VarsetXError::DuplicateNodeName { name });
        }
    }

    for id in chain.all_nodes() {
        if has_cycle(chain, &id) {
            return Err(VarsetXError::ChainCycleDetected {
                node_id: id.to_string(),
            });
        }
    }

    if let Some(active) = chain.active_output() {
        if Some(&active) != root && !chain.contains(&active) {
            return Err(VarsetXError::InvalidActiveOutput {
                node_id: active.to_string(),
            });
        }
        upstream_path(chain, &active, root)?;
    }

    Ok(())
}

/// Validate a node the chain builder just appended
///
/// 1. Node names are unique
/// 2. The node's upstream walk does not revisit a node
/// 3. The active output, if set, is a node of the chain or the node's input
///
/// Unlike `validate_chain`, the active branch need not reach a particular
/// root: the builder attaches below whichever branch is active, including a
/// sub-chain hanging off another input.
///
/// # Errors
/// Returns the first violation found.
pub fn validate_appended<C: ChainStore + ?Sized>(chain: &C, node: &NodeRef) -> Result<()> {
    let mut names = HashSet::new();
    for name in chain.node_names() {
        if !names.insert(name.clone()) {
            return Err(VarsetXError::DuplicateNodeName { name });
        }
    }

    if has_cycle(chain, node) {
        return Err(VarsetXError::ChainCycleDetected {
            node_id: node.to_string(),
        });
    }

    if let Some(active) = chain.active_output() {
        let input = chain.node(node).and_then(|n| n.upstream.clone());
        if !chain.contains(&active) && Some(&active) != input.as_ref() {
            return Err(VarsetXError::InvalidActiveOutput {
                node_id: active.to_string(),
            });
        }
    }

    Ok(())
}

/// Check whether following upstream links from `start` revisits a node
pub fn has_cycle<C: ChainStore + ?Sized>(chain: &C, start: &NodeRef) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(start.clone());

    while let Some(id) = current {
        let Some(node) = chain.node(&id) else {
            return false;
        };
        if !visited.insert(id) {
            return true;
        }
        current = node.upstream.clone();
    }

    false
}
