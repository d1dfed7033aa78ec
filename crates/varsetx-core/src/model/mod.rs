pub mod edit_node;
pub mod selection;

pub use edit_node::{EditNode, NodeRef};
pub use selection::{ChoiceTriple, SelectionLevel, SelectionState};
