use crate::errors::Result;
use crate::model::{EditNode, NodeRef};
use crate::ops::store::ChainStore;
use crate::traversal::upstream_path;

/// Render an edit chain to Markdown
///
/// Generates:
/// - The active output as a header line
/// - The active branch, input first, one numbered line per node
/// - Nodes off the active branch under "Other nodes", in store order
///
/// # Errors
/// * `ChainCycleDetected` / `DanglingUpstream` - If the active branch is broken
pub fn render_chain<C: ChainStore + ?Sized>(chain: &C, root: Option<&NodeRef>) -> Result<String> {
    let mut output = String::from("# Edit chain\n\n");

    let Some(active) = chain.active_output() else {
        output.push_str("_No active output_\n");
        render_others(chain, &[], &mut output);
        return Ok(output);
    };

    let active_label = chain
        .node(&active)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| active.to_string());
    output.push_str(&format!("**Active output**: `{}`\n\n", active_label));

    let branch = upstream_path(chain, &active, root)?;
    for (index, id) in branch.iter().enumerate() {
        let line = match chain.node(id) {
            Some(node) => render_node(node),
            None => format!("`{}` (input)", id),
        };
        output.push_str(&format!("{}. {}\n", index + 1, line));
    }

    render_others(chain, &branch, &mut output);
    Ok(output)
}

fn render_node(node: &EditNode) -> String {
    let mut line = format!("**{}**", node.name);
    match node.recorded_triple() {
        Some(triple) => line.push_str(&format!(" `{}`", triple)),
        None => line.push_str(" (no selection recorded)"),
    }
    if let Some(marker) = &node.marker {
        line.push_str(&format!(" [{}]", marker));
    }
    line
}

fn render_others<C: ChainStore + ?Sized>(chain: &C, branch: &[NodeRef], output: &mut String) {
    let others: Vec<&EditNode> = chain
        .all_nodes()
        .iter()
        .filter(|id| !branch.contains(id))
        .filter_map(|id| chain.node(id))
        .collect();
    if others.is_empty() {
        return;
    }

    output.push_str("\n## Other nodes\n\n");
    for node in others {
        let upstream = node
            .upstream
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "none".to_string());
        output.push_str(&format!("- {} <- `{}`\n", render_node(node), upstream));
    }
}
