//! Command types for host UI events
//!
//! Each variant is one user action in a selection panel. Hosts bind their
//! widget callbacks to commands and hand them to `apply()`.

/// Command enum covering every user-driven operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick a node path; `None` clears the selection
    SelectNode { path: Option<String> },

    /// Pick a choice group on the selected node; `None` clears it
    SelectGroup { name: Option<String> },

    /// Pick a choice within the selected group; `None` clears it
    SelectChoice { name: Option<String> },

    /// Append or reuse an edit node for the confirmed selection
    ApplySelection,

    /// Remove every applier-created edit node
    ResetChain,
}

impl Command {
    /// Stable operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::SelectNode { .. } => "select_node",
            Command::SelectGroup { .. } => "select_group",
            Command::SelectChoice { .. } => "select_choice",
            Command::ApplySelection => "apply_selection",
            Command::ResetChain => "reset_chain",
        }
    }

    /// Whether the command mutates the edit chain
    pub fn mutates_chain(&self) -> bool {
        matches!(self, Command::ApplySelection | Command::ResetChain)
    }
}
