pub mod builder;
pub mod cascade;
pub mod reset;
pub mod store;

pub use builder::{apply_selection, find_edit_node, ApplyKind, ApplyOutcome};
pub use cascade::SelectionCascade;
pub use reset::{reset_chain, ResetOutcome};
pub use store::{ChainStore, InMemoryChain};

use crate::errors::VarsetXError;

/// Fold a store-level failure into `ChainMutationFailed`
pub(crate) fn mutation_failed(err: VarsetXError) -> VarsetXError {
    match err {
        VarsetXError::ChainMutationFailed { .. } => err,
        other => VarsetXError::ChainMutationFailed {
            reason: other.to_string(),
        },
    }
}
