use std::collections::HashSet;

use crate::errors::{Result, VarsetXError};
use crate::model::NodeRef;
use crate::ops::store::ChainStore;

/// Compute the upstream path from an input down to `start`
///
/// Follows single-input references from `start` until they leave the
/// store, then reverses to get input-first order. The last element is
/// `start`; the first is the input the path terminates at.
///
/// When `root` is given, the path must terminate exactly there. Without a
/// root, the first reference outside the store ends the walk.
///
/// # Errors
/// * `ChainCycleDetected` - If a node is visited twice
/// * `DanglingUpstream` - If the walk leaves the store somewhere other than
///   `root`, or reaches a node with no input
pub fn upstream_path<C: ChainStore + ?Sized>(
    chain: &C,
    start: &NodeRef,
    root: Option<&NodeRef>,
) -> Result<Vec<NodeRef>> {
    let mut path = Vec::new();
    let mut visited = HashSet::new();
    let mut previous: Option<NodeRef> = None;
    let mut current = start.clone();

    loop {
        if Some(&current) == root {
            path.push(current);
            break;
        }

        let Some(node) = chain.node(&current) else {
            if root.is_some() {
                return Err(VarsetXError::DanglingUpstream {
                    node_id: previous.unwrap_or_else(|| current.clone()).to_string(),
                    upstream_id: current.to_string(),
                });
            }
            path.push(current);
            break;
        };

        if !visited.insert(node.id.clone()) {
            return Err(VarsetXError::ChainCycleDetected {
                node_id: node.id.to_string(),
            });
        }
        path.push(node.id.clone());

        let Some(upstream) = node.upstream.clone() else {
            return Err(VarsetXError::DanglingUpstream {
                node_id: node.id.to_string(),
                upstream_id: "<none>".to_string(),
            });
        };
        previous = Some(node.id.clone());
        current = upstream;
    }

    path.reverse();
    Ok(path)
}

/// Every store node plus every store node reachable through upstream links
///
/// First-seen order: store order, with upstream ancestors following the
/// node that led to them. Cycles are cut rather than reported.
pub fn reachable_edit_nodes<C: ChainStore + ?Sized>(chain: &C) -> Vec<NodeRef> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for id in chain.all_nodes() {
        let mut current = Some(id);
        while let Some(id) = current {
            let Some(node) = chain.node(&id) else { break };
            if !seen.insert(id.clone()) {
                break;
            }
            current = node.upstream.clone();
            ordered.push(id);
        }
    }

    ordered
}
