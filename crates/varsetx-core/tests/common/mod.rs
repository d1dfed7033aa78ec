use varsetx_core::model::{ChoiceTriple, EditNode, NodeRef};
use varsetx_core::ops::{ChainStore, InMemoryChain, SelectionCascade};
use varsetx_core::scene::{ChoiceGroup, InMemoryScene};

pub const ROOT: &str = "scene_input";

/// Root input reference shared by the chain fixtures
#[allow(dead_code)]
pub fn root() -> NodeRef {
    NodeRef::new(ROOT)
}

/// `/A` with look = {red, blue}, `/B` with no groups
#[allow(dead_code)]
pub fn scenario_scene() -> InMemoryScene {
    InMemoryScene::new()
        .with_node("/A", vec![ChoiceGroup::new("look", ["red", "blue"])])
        .with_node("/B", vec![])
}

/// Cascade loaded with `scenario_scene()`
#[allow(dead_code)]
pub fn scenario_cascade() -> SelectionCascade {
    let mut cascade = SelectionCascade::new();
    cascade
        .set_scene_handle(Box::new(scenario_scene()))
        .unwrap();
    cascade
}

/// Empty chain whose active output is the root input
#[allow(dead_code)]
pub fn empty_chain() -> InMemoryChain {
    InMemoryChain::with_active_output(root())
}

/// Insert a node authored by hand (no applier marker)
#[allow(dead_code)]
pub fn add_manual_node(
    chain: &mut InMemoryChain,
    name: &str,
    upstream: &NodeRef,
    triple: Option<ChoiceTriple>,
) -> NodeRef {
    chain
        .create_edit_node(EditNode::authored(
            NodeRef::generate(),
            name.to_string(),
            Some(upstream.clone()),
            triple,
        ))
        .unwrap()
}

/// Names of the nodes along the active branch, input excluded
#[allow(dead_code)]
pub fn active_branch_names(chain: &InMemoryChain) -> Vec<String> {
    let Some(active) = chain.active_output() else {
        return Vec::new();
    };
    varsetx_core::traversal::upstream_path(chain, &active, Some(&root()))
        .unwrap()
        .iter()
        .filter_map(|id| chain.node(id).map(|n| n.name.clone()))
        .collect()
}
