//! Edit chain builder
//!
//! Turns a confirmed (node, group, choice) triple into a graph edit: an
//! identical applier-created node anywhere in the chain is reused, otherwise
//! a new node is appended downstream of the active output.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ApplierConfig;
use crate::errors::{Result, VarsetXError};
use crate::model::{ChoiceTriple, EditNode, NodeRef};
use crate::notify::{Notification, NotificationKind};
use crate::ops::mutation_failed;
use crate::ops::store::ChainStore;
use crate::rules::validate_appended;
use crate::traversal::reachable_edit_nodes;
use crate::{log_op_end, log_op_error, log_op_start};

/// Whether `apply_selection` appended a node or reused one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyKind {
    Created,
    Reused,
}

/// Result of a successful `apply_selection`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub kind: ApplyKind,
    /// The node that is now the active output
    pub node: NodeRef,
    pub name: String,
    pub triple: ChoiceTriple,
}

impl ApplyOutcome {
    pub fn notification(&self) -> Notification {
        match self.kind {
            ApplyKind::Created => Notification::new(
                NotificationKind::Created,
                format!("Created edit node '{}' for {}", self.name, self.triple),
            ),
            ApplyKind::Reused => Notification::new(
                NotificationKind::Reused,
                format!("Reused edit node '{}' for {}", self.name, self.triple),
            ),
        }
    }
}

/// Apply a confirmed triple to the chain
///
/// # Arguments
/// * `chain` - The edit chain store, read fresh on every call
/// * `root_input` - The chain's base scene input, if known
/// * `triple` - Fully populated selection
/// * `config` - Applier marker and naming settings
///
/// # Errors
/// * `IncompleteSelection` - If any triple field is empty; no mutation
/// * `NoAttachmentPoint` - If there is neither an active output nor a root input
/// * `ChainMutationFailed` - If the store refuses a mutation; the chain is
///   left as it was before the call
/// * Validation errors from `validate_appended` when `validate_after_apply`
///   is set and the new node breaks the chain; the new node is rolled back
pub fn apply_selection<C: ChainStore + ?Sized>(
    chain: &mut C,
    root_input: Option<&NodeRef>,
    triple: &ChoiceTriple,
    config: &ApplierConfig,
) -> Result<ApplyOutcome> {
    log_op_start!(
        "apply_selection",
        node_path = triple.node_path.as_str(),
        group = triple.group.as_str(),
        choice = triple.choice.as_str()
    );
    let start = std::time::Instant::now();

    let outcome = apply_selection_impl(chain, root_input, triple, config).map_err(|e| {
        log_op_error!(
            "apply_selection",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            node_path = triple.node_path.as_str(),
            choice = triple.choice.as_str()
        );
        e
    })?;

    log_op_end!(
        "apply_selection",
        duration_ms = start.elapsed().as_millis() as u64,
        node_path = triple.node_path.as_str(),
        choice = triple.choice.as_str(),
        edit_node_id = outcome.node.as_str(),
        kind = ?outcome.kind
    );

    Ok(outcome)
}

fn apply_selection_impl<C: ChainStore + ?Sized>(
    chain: &mut C,
    root_input: Option<&NodeRef>,
    triple: &ChoiceTriple,
    config: &ApplierConfig,
) -> Result<ApplyOutcome> {
    triple.validate()?;

    if let Some(existing) = find_edit_node(chain, triple, config) {
        let name = chain
            .node(&existing)
            .map(|n| n.name.clone())
            .unwrap_or_default();
        if chain.active_output().as_ref() != Some(&existing) {
            chain
                .set_active_output(Some(existing.clone()))
                .map_err(mutation_failed)?;
        }
        return Ok(ApplyOutcome {
            kind: ApplyKind::Reused,
            node: existing,
            name,
            triple: triple.clone(),
        });
    }

    let insertion_point = insertion_point(chain, root_input)?;
    let name = unique_node_name(chain, &config.name_prefix, &triple.choice);
    let node = EditNode::applied(
        NodeRef::generate(),
        name.clone(),
        insertion_point,
        triple.clone(),
        config.marker.clone(),
    );

    let previous_active = chain.active_output();
    let created = chain.create_edit_node(node).map_err(mutation_failed)?;

    if let Err(e) = chain.set_active_output(Some(created.clone())) {
        rollback(chain, &created, previous_active);
        return Err(mutation_failed(e));
    }

    if config.validate_after_apply {
        if let Err(e) = validate_appended(chain, &created) {
            rollback(chain, &created, previous_active);
            return Err(e);
        }
    }

    Ok(ApplyOutcome {
        kind: ApplyKind::Created,
        node: created,
        name,
        triple: triple.clone(),
    })
}

/// Find an applier-created node recording exactly `triple`
///
/// Searches every node reachable in the chain, not only the active branch.
/// Nodes without the configured marker, and marked nodes that do not expose
/// a complete triple, are never candidates.
pub fn find_edit_node<C: ChainStore + ?Sized>(
    chain: &C,
    triple: &ChoiceTriple,
    config: &ApplierConfig,
) -> Option<NodeRef> {
    reachable_edit_nodes(chain).into_iter().find(|id| {
        chain.node(id).is_some_and(|node| {
            node.has_marker(&config.marker) && node.recorded_triple() == Some(triple)
        })
    })
}

/// Node a new edit attaches to: the active output, else the root input
///
/// An active output outside the chain is taken as an input reference. With a
/// root input to fall back on, one that is not that root is stale (the chain
/// was rebuilt externally) and is ignored.
fn insertion_point<C: ChainStore + ?Sized>(
    chain: &C,
    root_input: Option<&NodeRef>,
) -> Result<NodeRef> {
    if let Some(active) = chain.active_output() {
        if chain.contains(&active) || root_input.is_none() || root_input == Some(&active) {
            return Ok(active);
        }
        tracing::warn!(
            op = "apply_selection",
            edit_node_id = active.as_str(),
            "ignoring stale active output"
        );
    }
    root_input.cloned().ok_or(VarsetXError::NoAttachmentPoint)
}

/// Collision-free name derived from the choice name
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a taken name gets the
/// first free `_N` suffix.
pub fn unique_node_name<C: ChainStore + ?Sized>(chain: &C, prefix: &str, choice: &str) -> String {
    let sanitized: String = choice
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let base = format!("{}{}", prefix, sanitized);
    let base = if base.is_empty() { "edit".to_string() } else { base };

    let taken: HashSet<String> = chain.node_names().into_iter().collect();
    if !taken.contains(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(base)
}

fn rollback<C: ChainStore + ?Sized>(chain: &mut C, created: &NodeRef, previous: Option<NodeRef>) {
    if let Err(e) = chain.remove_node(created) {
        tracing::error!(
            op = "apply_selection",
            edit_node_id = created.as_str(),
            error = %e,
            "rollback could not remove created node"
        );
    }
    if chain.active_output().as_ref() == Some(created) {
        if let Err(e) = chain.set_active_output(previous) {
            tracing::error!(
                op = "apply_selection",
                edit_node_id = created.as_str(),
                error = %e,
                "rollback could not restore active output"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::store::InMemoryChain;

    fn root() -> NodeRef {
        NodeRef::new("scene_input")
    }

    #[test]
    fn test_incomplete_triple_rejected_without_mutation() {
        let mut chain = InMemoryChain::with_active_output(root());
        let result = apply_selection(
            &mut chain,
            Some(&root()),
            &ChoiceTriple::new("/A", "", "red"),
            &ApplierConfig::default(),
        );

        assert!(matches!(
            result,
            Err(VarsetXError::IncompleteSelection { .. })
        ));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_no_attachment_point() {
        let mut chain = InMemoryChain::new();
        let result = apply_selection(
            &mut chain,
            None,
            &ChoiceTriple::new("/A", "look", "red"),
            &ApplierConfig::default(),
        );

        assert_eq!(result, Err(VarsetXError::NoAttachmentPoint));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_unique_name_suffixes() {
        let mut chain = InMemoryChain::new();
        for name in ["red", "red_1"] {
            chain
                .create_edit_node(EditNode::authored(
                    NodeRef::new(name),
                    name.to_string(),
                    Some(root()),
                    None,
                ))
                .unwrap();
        }

        assert_eq!(unique_node_name(&chain, "", "red"), "red_2");
        assert_eq!(unique_node_name(&chain, "", "blue"), "blue");
        assert_eq!(unique_node_name(&chain, "set_", "red"), "set_red");
        assert_eq!(unique_node_name(&chain, "", "dark red!"), "dark_red_");
        assert_eq!(unique_node_name(&chain, "", ""), "edit");
    }

    #[test]
    fn test_stale_active_output_falls_back_to_root() {
        let mut chain = InMemoryChain::with_active_output(NodeRef::new("deleted_elsewhere"));
        let outcome = apply_selection(
            &mut chain,
            Some(&root()),
            &ChoiceTriple::new("/A", "look", "red"),
            &ApplierConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.kind, ApplyKind::Created);
        assert_eq!(chain.node(&outcome.node).unwrap().upstream, Some(root()));
    }

    #[test]
    fn test_active_root_without_known_root_input() {
        // Active output names the scene input, but the caller passes no root
        let mut chain = InMemoryChain::with_active_output(root());
        let outcome = apply_selection(
            &mut chain,
            None,
            &ChoiceTriple::new("/A", "look", "blue"),
            &ApplierConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.kind, ApplyKind::Created);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.node(&outcome.node).unwrap().upstream, Some(root()));
        assert_eq!(chain.active_output(), Some(outcome.node));
    }

    #[test]
    fn test_outcome_notification() {
        let outcome = ApplyOutcome {
            kind: ApplyKind::Reused,
            node: NodeRef::new("e1"),
            name: "blue".to_string(),
            triple: ChoiceTriple::new("/A", "look", "blue"),
        };
        let notification = outcome.notification();
        assert_eq!(notification.kind, NotificationKind::Reused);
        assert_eq!(
            notification.message,
            "Reused edit node 'blue' for /A {look=blue}"
        );
    }
}
