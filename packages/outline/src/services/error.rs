//! Outline Error Types
//!
//! This module defines the error taxonomy for the outline core. Drag
//! handling treats most of these as "reject the drop and move on": the tree
//! is left untouched and the gesture state resets, with no error surfaced
//! beyond a log line.

use thiserror::Error;

use crate::models::{EntityKind, IdParseError, NodeId};

/// Errors raised by outline operations
#[derive(Error, Debug)]
pub enum OutlineError {
    /// Active or hover id absent from the tree / flattened sequence.
    /// Drag-end handling aborts as a no-op.
    #[error("Node not found in outline: {id}")]
    NotFound { id: String },

    /// Constraint enforcement rejected the drop: the dragged kind cannot
    /// live under the resolved parent. The tree stays unchanged.
    #[error("Invalid parent for {child} node: {parent}")]
    InvalidParentType { child: EntityKind, parent: String },

    /// A node cannot be moved into its own subtree.
    #[error("Circular move: {id} cannot become a child of its own subtree")]
    CircularMove { id: String },

    /// A second drag was started before the previous one ended.
    #[error("A drag gesture is already in progress")]
    DragInProgress,

    /// A composite node id failed to parse.
    #[error("Invalid node id: {0}")]
    InvalidId(#[from] IdParseError),

    /// The structure fetch at the persistence boundary failed.
    #[error("Structure fetch failed: {0}")]
    FetchFailed(#[source] anyhow::Error),

    /// The reorder write at the persistence boundary failed. The optimistic
    /// tree is kept; reconciliation happens on the next fetch.
    #[error("Reorder persistence failed: {0}")]
    PersistenceFailure(#[source] anyhow::Error),
}

impl OutlineError {
    /// Create a not found error
    pub fn not_found(id: &NodeId) -> Self {
        Self::NotFound {
            id: id.to_string(),
        }
    }

    /// Create an invalid parent type error
    pub fn invalid_parent_type(child: EntityKind, parent: Option<EntityKind>) -> Self {
        Self::InvalidParentType {
            child,
            parent: parent
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "root".to_string()),
        }
    }

    /// Create a circular move error
    pub fn circular_move(id: &NodeId) -> Self {
        Self::CircularMove {
            id: id.to_string(),
        }
    }

    /// Create a fetch failed error
    pub fn fetch_failed(err: anyhow::Error) -> Self {
        Self::FetchFailed(err)
    }

    /// Create a persistence failure error
    pub fn persistence_failure(err: anyhow::Error) -> Self {
        Self::PersistenceFailure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let id: NodeId = "step_4".parse().unwrap();
        let err = OutlineError::not_found(&id);
        assert_eq!(format!("{}", err), "Node not found in outline: step_4");
    }

    #[test]
    fn test_invalid_parent_type_display() {
        let err =
            OutlineError::invalid_parent_type(EntityKind::Question, Some(EntityKind::Section));
        assert_eq!(
            format!("{}", err),
            "Invalid parent for question node: section"
        );

        let err = OutlineError::invalid_parent_type(EntityKind::Step, None);
        assert_eq!(format!("{}", err), "Invalid parent for step node: root");
    }

    #[test]
    fn test_circular_move_display() {
        let id: NodeId = "section_2".parse().unwrap();
        let err = OutlineError::circular_move(&id);
        assert_eq!(
            format!("{}", err),
            "Circular move: section_2 cannot become a child of its own subtree"
        );
    }

    #[test]
    fn test_id_parse_error_converts() {
        let parse_err = "widget_1".parse::<NodeId>().unwrap_err();
        let err: OutlineError = parse_err.into();
        assert!(matches!(err, OutlineError::InvalidId(_)));
    }
}
