//! Outline Events
//!
//! Events emitted by [`crate::services::OutlineService`] when the outline
//! changes. They follow the observer pattern over a tokio broadcast channel,
//! so the UI shell (toasts, save indicators) can react to reorders and
//! persistence outcomes without coupling to the service internals.

use crate::models::{NodeId, ReorderEntry};

/// Events emitted by the outline service
#[derive(Debug, Clone)]
pub enum OutlineEvent {
    /// The in-memory tree was replaced by a fresh authoritative structure.
    StructureReplaced { questionnaire_id: i64 },

    /// A drop was applied optimistically to the in-memory tree.
    ReorderApplied {
        moved: NodeId,
        entries: Vec<ReorderEntry>,
    },

    /// The reorder patch was accepted by the persistence boundary.
    ReorderPersisted { entry_count: usize },

    /// The reorder patch was rejected or the write failed. The optimistic
    /// tree is kept; the UI should surface a non-blocking notification.
    PersistFailed { message: String },
}

impl OutlineEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            OutlineEvent::StructureReplaced { .. } => "outline:structure-replaced",
            OutlineEvent::ReorderApplied { .. } => "outline:reorder-applied",
            OutlineEvent::ReorderPersisted { .. } => "outline:reorder-persisted",
            OutlineEvent::PersistFailed { .. } => "outline:persist-failed",
        }
    }
}
