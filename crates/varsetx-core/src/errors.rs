use thiserror::Error;
use varsetx_core_types::SessionId;

use crate::model::SelectionLevel;

/// Result type alias using VarsetXError
pub type Result<T> = std::result::Result<T, VarsetXError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that hosts can match on without
/// parsing messages. Every kind is recoverable at the calling boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Selection
    InvalidSelection,
    IncompleteSelection,
    SceneQueryFailed,

    // Edit chain
    NoAttachmentPoint,
    ChainMutationFailed,
    NotFound,
    AlreadyExists,
    CycleDetected,
    ConstraintViolation,

    // Loading / configuration
    LoadFailed,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSelection => "ERR_INVALID_SELECTION",
            ExErrorKind::IncompleteSelection => "ERR_INCOMPLETE_SELECTION",
            ExErrorKind::SceneQueryFailed => "ERR_SCENE_QUERY_FAILED",
            ExErrorKind::NoAttachmentPoint => "ERR_NO_ATTACHMENT_POINT",
            ExErrorKind::ChainMutationFailed => "ERR_CHAIN_MUTATION_FAILED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::LoadFailed => "ERR_LOAD_FAILED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever selection context was known
/// when the failure happened.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    session_id: Option<SessionId>,
    node_path: Option<String>,
    group: Option<String>,
    choice: Option<String>,
    edit_node_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            session_id: None,
            node_path: None,
            group: None,
            choice: None,
            edit_node_id: None,
            message: String::new(),
            source: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add session context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add scene node path context
    pub fn with_node_path(mut self, path: impl Into<String>) -> Self {
        self.node_path = Some(path.into());
        self
    }

    /// Add choice group context
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Add choice context
    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }

    /// Add edit node context
    pub fn with_edit_node_id(mut self, id: impl Into<String>) -> Self {
        self.edit_node_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add the candidate values that were on offer (InvalidSelection)
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the session context, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Get the node path context, if any
    pub fn node_path(&self) -> Option<&str> {
        self.node_path.as_deref()
    }

    /// Get the group context, if any
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Get the choice context, if any
    pub fn choice(&self) -> Option<&str> {
        self.choice.as_deref()
    }

    /// Get the edit node context, if any
    pub fn edit_node_id(&self) -> Option<&str> {
        self.edit_node_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Get candidate values, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.node_path {
            write!(f, " (node: {})", path)?;
        }
        if let Some(group) = &self.group {
            write!(f, " (group: {})", group)?;
        }
        if let Some(choice) = &self.choice {
            write!(f, " (choice: {})", choice)?;
        }
        if let Some(id) = &self.edit_node_id {
            write!(f, " (edit_node: {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for selection and edit-chain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VarsetXError {
    // ===== Selection Errors =====
    /// Value is not in the current candidate list for its level
    #[error("Invalid {level} selection: '{value}' is not a current candidate")]
    InvalidSelection {
        level: SelectionLevel,
        value: String,
        candidates: Vec<String>,
    },

    /// A triple was used while one of its fields was still empty
    #[error("Incomplete selection: {field} is empty")]
    IncompleteSelection { field: SelectionLevel },

    /// The scene accessor could not resolve a path
    #[error("Scene query failed for {node_path}: {reason}")]
    SceneQueryFailed { node_path: String, reason: String },

    // ===== Edit Chain Errors =====
    /// Neither a root input nor an active output is available
    #[error("No attachment point: chain has no active output and no root input was given")]
    NoAttachmentPoint,

    /// The chain store refused a mutation
    #[error("Chain mutation failed: {reason}")]
    ChainMutationFailed { reason: String },

    /// Edit node id is not present in the chain
    #[error("Edit node not found: {node_id}")]
    EditNodeNotFound { node_id: String },

    /// A node with this name already exists in the chain
    #[error("Edit node name already in use: {name}")]
    DuplicateNodeName { name: String },

    /// Following upstream references revisits a node
    #[error("Cycle detected in edit chain at node {node_id}")]
    ChainCycleDetected { node_id: String },

    /// An upstream reference points at neither a chain node nor the root input
    #[error("Edit node {node_id} has dangling upstream {upstream_id}")]
    DanglingUpstream {
        node_id: String,
        upstream_id: String,
    },

    /// The active output is neither the root input nor a chain node
    #[error("Active output {node_id} is not part of the chain")]
    InvalidActiveOutput { node_id: String },

    // ===== Loading / Configuration =====
    /// The scene loader could not produce a scene
    #[error("Failed to load scene {locator}: {diagnostic}")]
    LoadFailed { locator: String, diagnostic: String },

    /// Applier configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<VarsetXError> for ExError {
    fn from(err: VarsetXError) -> Self {
        match err {
            VarsetXError::InvalidSelection {
                level,
                value,
                candidates,
            } => {
                let ex = ExError::new(ExErrorKind::InvalidSelection)
                    .with_message(format!("'{}' is not a current {} candidate", value, level))
                    .with_candidates(candidates);
                match level {
                    SelectionLevel::Node => ex.with_node_path(value),
                    SelectionLevel::Group => ex.with_group(value),
                    SelectionLevel::Choice => ex.with_choice(value),
                }
            }

            VarsetXError::IncompleteSelection { field } => {
                ExError::new(ExErrorKind::IncompleteSelection)
                    .with_message(format!("Selection field '{}' is empty", field))
            }

            VarsetXError::SceneQueryFailed { node_path, reason } => {
                ExError::new(ExErrorKind::SceneQueryFailed)
                    .with_node_path(node_path)
                    .with_message(reason)
            }

            VarsetXError::NoAttachmentPoint => ExError::new(ExErrorKind::NoAttachmentPoint)
                .with_message("Chain has no active output and no root input"),

            VarsetXError::ChainMutationFailed { reason } => {
                ExError::new(ExErrorKind::ChainMutationFailed).with_message(reason)
            }

            VarsetXError::EditNodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_edit_node_id(node_id)
                .with_message("Edit node not found"),

            VarsetXError::DuplicateNodeName { name } => ExError::new(ExErrorKind::AlreadyExists)
                .with_message(format!("Edit node name '{}' already in use", name)),

            VarsetXError::ChainCycleDetected { node_id } => {
                ExError::new(ExErrorKind::CycleDetected)
                    .with_edit_node_id(node_id)
                    .with_message("Upstream references form a cycle")
            }

            VarsetXError::DanglingUpstream {
                node_id,
                upstream_id,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_edit_node_id(node_id)
                .with_message(format!("Upstream {} is not in the chain", upstream_id)),

            VarsetXError::InvalidActiveOutput { node_id } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_edit_node_id(node_id)
                    .with_message("Active output is not part of the chain")
            }

            VarsetXError::LoadFailed {
                locator,
                diagnostic,
            } => ExError::new(ExErrorKind::LoadFailed)
                .with_op("load_scene")
                .with_message(format!("{}: {}", locator, diagnostic)),

            VarsetXError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }
        }
    }
}
