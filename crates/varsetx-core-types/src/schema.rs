//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SESSION_ID: &str = "session_id";

// Selection identifiers
pub const FIELD_NODE_PATH: &str = "node_path";
pub const FIELD_GROUP: &str = "group";
pub const FIELD_CHOICE: &str = "choice";
pub const FIELD_EDIT_NODE_ID: &str = "edit_node_id";

// Collection sizes
pub const FIELD_CANDIDATES_LEN: &str = "candidates_len";
pub const FIELD_REMOVED_LEN: &str = "removed_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
