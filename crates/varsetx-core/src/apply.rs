//! Command dispatch for host UIs
//!
//! `apply()` is the single entry point a host binds its panel events to. A
//! `Session` owns the selection cascade and applier configuration; the edit
//! chain and root input are passed in on every call so the host's graph
//! stays the only source of truth.
//!
//! ## Example
//!
//! ```
//! use varsetx_core::apply::{apply, Session};
//! use varsetx_core::commands::Command;
//! use varsetx_core::model::NodeRef;
//! use varsetx_core::ops::InMemoryChain;
//! use varsetx_core::scene::{ChoiceGroup, InMemoryScene};
//!
//! let scene = InMemoryScene::new().with_node(
//!     "/A",
//!     vec![ChoiceGroup::new("look", ["red", "blue"])],
//! );
//! let root = NodeRef::new("scene_input");
//! let mut chain = InMemoryChain::with_active_output(root.clone());
//!
//! let mut session = Session::default();
//! session.load_scene(Box::new(scene)).unwrap();
//!
//! for cmd in [
//!     Command::SelectNode { path: Some("/A".to_string()) },
//!     Command::SelectChoice { name: Some("blue".to_string()) },
//!     Command::ApplySelection,
//! ] {
//!     apply(&mut session, &mut chain, Some(&root), cmd).unwrap();
//! }
//! assert_eq!(chain.len(), 1);
//! ```

use varsetx_core_types::SessionId;

use crate::commands::Command;
use crate::config::ApplierConfig;
use crate::errors::{ExError, Result, VarsetXError};
use crate::model::NodeRef;
use crate::notify::{Notification, NotificationKind};
use crate::ops::{apply_selection, reset_chain, ChainStore, SelectionCascade};
use crate::scene::SceneHandle;

/// One inspector panel's worth of state
#[derive(Debug, Default)]
pub struct Session {
    pub id: SessionId,
    pub cascade: SelectionCascade,
    pub config: ApplierConfig,
}

impl Session {
    pub fn new(config: ApplierConfig) -> Self {
        Self {
            id: SessionId::new(),
            cascade: SelectionCascade::new(),
            config,
        }
    }

    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    /// Hand a freshly loaded scene to the cascade
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If the scene cannot be enumerated
    pub fn load_scene(&mut self, handle: Box<dyn SceneHandle>) -> Result<Notification> {
        let _span = tracing::info_span!("session", session_id = self.id.as_str()).entered();
        self.cascade.set_scene_handle(handle)
    }

    /// Structured error for a failed command, tagged with this session
    ///
    /// Selection context missing from the error is filled from the cascade.
    pub fn describe_error(&self, cmd: &Command, err: VarsetXError) -> ExError {
        let mut ex: ExError = err.into();
        if ex.op().is_none() {
            ex = ex.with_op(cmd.op_name());
        }
        ex = ex.with_session_id(self.id.clone());

        let selection = self.cascade.current_selection();
        if ex.node_path().is_none() {
            if let Some(node) = selection.node {
                ex = ex.with_node_path(node);
            }
        }
        if ex.group().is_none() {
            if let Some(group) = selection.group {
                ex = ex.with_group(group);
            }
        }
        if ex.choice().is_none() {
            if let Some(choice) = selection.choice {
                ex = ex.with_choice(choice);
            }
        }
        ex
    }
}

/// Dispatch one command against a session and an edit chain
///
/// Selection commands never touch the chain. `ApplySelection` requires a
/// complete selection; `ResetChain` works regardless of the selection,
/// which it leaves untouched.
///
/// # Errors
/// Whatever the underlying operation returns. A failed command leaves the
/// chain unchanged except where `reset_chain` documents otherwise.
pub fn apply<C: ChainStore + ?Sized>(
    session: &mut Session,
    chain: &mut C,
    root_input: Option<&NodeRef>,
    cmd: Command,
) -> Result<Notification> {
    let _span = tracing::info_span!("session", session_id = session.id.as_str()).entered();

    match cmd {
        Command::SelectNode { path } => {
            session.cascade.select_node(path.as_deref())?;
            let selection = session.cascade.current_selection();
            Ok(match (selection.node, selection.group) {
                (None, _) => Notification::new(NotificationKind::Selected, "Selection cleared"),
                (Some(node), Some(group)) => Notification::new(
                    NotificationKind::Selected,
                    format!("Selected node {} (group {})", node, group),
                ),
                (Some(node), None) => Notification::new(
                    NotificationKind::Selected,
                    format!("Selected node {}", node),
                ),
            })
        }

        Command::SelectGroup { name } => {
            session.cascade.select_group(name.as_deref())?;
            Ok(Notification::new(
                NotificationKind::Selected,
                match name {
                    Some(name) => format!("Selected group {}", name),
                    None => "Group cleared".to_string(),
                },
            ))
        }

        Command::SelectChoice { name } => {
            session.cascade.select_choice(name.as_deref())?;
            Ok(Notification::new(
                NotificationKind::Selected,
                match name {
                    Some(name) => format!("Selected choice {}", name),
                    None => "Choice cleared".to_string(),
                },
            ))
        }

        Command::ApplySelection => {
            let triple = session.cascade.confirmed_triple()?;
            let outcome = apply_selection(chain, root_input, &triple, &session.config)?;
            Ok(outcome.notification())
        }

        Command::ResetChain => {
            let outcome = reset_chain(chain, root_input, &session.config)?;
            Ok(outcome.notification())
        }
    }
}
