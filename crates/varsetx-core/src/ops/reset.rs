use std::collections::HashSet;

use crate::config::ApplierConfig;
use crate::errors::Result;
use crate::model::{EditNode, NodeRef};
use crate::notify::{Notification, NotificationKind};
use crate::ops::mutation_failed;
use crate::ops::store::ChainStore;
use crate::{log_op_end, log_op_error, log_op_start};

/// Result of `reset_chain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    /// Removed nodes, in store order
    pub removed: Vec<EditNode>,
    /// Active output after the reset
    pub active_output: Option<NodeRef>,
}

impl ResetOutcome {
    pub fn count(&self) -> usize {
        self.removed.len()
    }

    pub fn notification(&self) -> Notification {
        if self.removed.is_empty() {
            Notification::new(
                NotificationKind::NothingToReset,
                "No applier-created edit nodes to remove",
            )
        } else {
            Notification::new(
                NotificationKind::Reset,
                format!("Removed {} edit node(s)", self.removed.len()),
            )
        }
    }
}

/// Remove every node carrying the applier marker
///
/// Unmarked nodes are never removed. A survivor whose input was removed is
/// rewired to its nearest surviving ancestor, and a removed active output
/// moves the same way, ending at `root_input` when nothing survives on the
/// path. Resetting a chain with no marked nodes is a no-op.
///
/// # Errors
/// * `ChainMutationFailed` - If the store refuses a rewire or removal
pub fn reset_chain<C: ChainStore + ?Sized>(
    chain: &mut C,
    root_input: Option<&NodeRef>,
    config: &ApplierConfig,
) -> Result<ResetOutcome> {
    log_op_start!("reset_chain");
    let start = std::time::Instant::now();

    let outcome = reset_chain_impl(chain, root_input, config).map_err(|e| {
        log_op_error!(
            "reset_chain",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "reset_chain",
        duration_ms = start.elapsed().as_millis() as u64,
        removed_len = outcome.count()
    );

    Ok(outcome)
}

fn reset_chain_impl<C: ChainStore + ?Sized>(
    chain: &mut C,
    root_input: Option<&NodeRef>,
    config: &ApplierConfig,
) -> Result<ResetOutcome> {
    let Some(plan) = plan_reset(chain, root_input, config) else {
        return Ok(ResetOutcome {
            removed: Vec::new(),
            active_output: chain.active_output(),
        });
    };

    for (id, upstream) in plan.rewires {
        tracing::debug!(
            op = "reset_chain",
            edit_node_id = id.as_str(),
            upstream = ?upstream.as_ref().map(NodeRef::as_str),
            "rewiring survivor"
        );
        chain.set_upstream(&id, upstream).map_err(mutation_failed)?;
    }

    if plan.new_active != chain.active_output() {
        chain
            .set_active_output(plan.new_active.clone())
            .map_err(mutation_failed)?;
    }

    let mut removed = Vec::with_capacity(plan.targets.len());
    for id in &plan.targets {
        removed.push(chain.remove_node(id).map_err(mutation_failed)?);
    }

    Ok(ResetOutcome {
        removed,
        active_output: plan.new_active,
    })
}

struct ResetPlan {
    targets: Vec<NodeRef>,
    rewires: Vec<(NodeRef, Option<NodeRef>)>,
    new_active: Option<NodeRef>,
}

/// Work out every mutation against the untouched chain; `None` if nothing is marked
fn plan_reset<C: ChainStore + ?Sized>(
    chain: &C,
    root_input: Option<&NodeRef>,
    config: &ApplierConfig,
) -> Option<ResetPlan> {
    let targets: Vec<NodeRef> = chain
        .all_nodes()
        .into_iter()
        .filter(|id| chain.node(id).is_some_and(|n| n.has_marker(&config.marker)))
        .collect();
    if targets.is_empty() {
        return None;
    }

    let doomed: HashSet<NodeRef> = targets.iter().cloned().collect();

    let rewires = chain
        .all_nodes()
        .into_iter()
        .filter(|id| !doomed.contains(id))
        .filter_map(|id| {
            let upstream = chain.node(&id)?.upstream.clone()?;
            if !doomed.contains(&upstream) {
                return None;
            }
            let survivor = nearest_survivor(chain, &upstream, &doomed, root_input);
            Some((id, survivor))
        })
        .collect();

    let new_active = match chain.active_output() {
        Some(id) if doomed.contains(&id) => nearest_survivor(chain, &id, &doomed, root_input),
        other => other,
    };

    Some(ResetPlan {
        targets,
        rewires,
        new_active,
    })
}

/// First reference at or above `start` that is not being removed
///
/// Falls back to `root_input` when every node on the walk is removed and the
/// walk ends without leaving the store (no input, or a cycle).
fn nearest_survivor<C: ChainStore + ?Sized>(
    chain: &C,
    start: &NodeRef,
    doomed: &HashSet<NodeRef>,
    root_input: Option<&NodeRef>,
) -> Option<NodeRef> {
    let mut visited = HashSet::new();
    let mut current = start.clone();

    loop {
        if !doomed.contains(&current) {
            return Some(current);
        }
        if !visited.insert(current.clone()) {
            return root_input.cloned();
        }
        match chain.node(&current).and_then(|n| n.upstream.clone()) {
            Some(upstream) => current = upstream,
            None => return root_input.cloned(),
        }
    }
}
