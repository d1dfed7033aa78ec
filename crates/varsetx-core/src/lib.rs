//! VarsetX Core - choice selection cascade and edit-chain synthesizer
//!
//! This crate provides:
//! - A node → choice group → choice selection state machine over any scene
//!   exposed through `scene::SceneHandle`
//! - An edit-chain builder that turns a confirmed selection into a new edit
//!   node, or reuses an identical applier-created one
//! - Chain reset, validation, upstream traversal and Markdown rendering
//!
//! The edit chain lives in the host's graph; every operation takes it as an
//! explicit `ops::ChainStore` argument.

pub mod apply;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod notify;
pub mod ops;
pub mod render;
pub mod rules;
pub mod scene;
pub mod traversal;

pub use varsetx_core_types::schema;

// Re-export commonly used types
pub use apply::{apply, Session};
pub use commands::Command;
pub use config::ApplierConfig;
pub use errors::{ExError, ExErrorKind, Result, VarsetXError};
pub use model::{ChoiceTriple, EditNode, NodeRef, SelectionLevel, SelectionState};
pub use notify::{Notification, NotificationKind, NotificationSink};
pub use ops::{ChainStore, InMemoryChain, SelectionCascade};
pub use scene::{SceneHandle, SceneLoader};
