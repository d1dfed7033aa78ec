//! Structured operation results for hosts
//!
//! Operations hand back a `Notification`; whether and how it is shown is
//! entirely the host's business. `NotificationSink` is the seam hosts plug
//! their message display into.

use serde::{Deserialize, Serialize};

/// What an operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Scene loaded with at least one selectable node
    CandidatesFound,
    /// Scene loaded but no node exposes a selectable choice group
    NoCandidates,
    /// A cascade level changed
    Selected,
    /// A new edit node was appended
    Created,
    /// An existing equivalent edit node became the active output
    Reused,
    /// Applier-created nodes were removed
    Reset,
    /// Reset found nothing to remove
    NothingToReset,
}

/// Kind plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Host-provided display channel
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

/// Sink that forwards notifications to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: &Notification) {
        match notification.kind {
            NotificationKind::NoCandidates | NotificationKind::NothingToReset => {
                tracing::warn!(kind = ?notification.kind, "{}", notification.message)
            }
            _ => tracing::info!(kind = ?notification.kind, "{}", notification.message),
        }
    }
}

/// Collecting sink, handy for hosts that batch messages and for tests
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}
