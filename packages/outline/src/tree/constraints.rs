//! Depth/Type Constraint Enforcer
//!
//! The schema layer on top of the domain-free projection: every entity kind
//! has exactly one legal depth and one legal parent kind. A projection that
//! overshoots the kind's depth is clamped (and its parent re-resolved at the
//! clamped depth); a projection whose resolved parent has the wrong kind is
//! rejected outright, turning the whole drop into a no-op. Silent coercion
//! (say, reparenting a question under a section) would corrupt questionnaire
//! semantics, so invalid drops are refused, never repaired.

use crate::models::EntityKind;
use crate::services::error::OutlineError;

use super::projection::{resolve_parent, Arranged, DragProjection};

/// Clamp a projection to the dragged kind's legal depth and validate the
/// resulting parent's kind.
pub(crate) fn constrain(
    arranged: &Arranged,
    projection: &DragProjection,
    kind: EntityKind,
) -> Result<DragProjection, OutlineError> {
    let max_depth = kind.fixed_depth();

    let constrained = if projection.depth > max_depth {
        DragProjection {
            depth: max_depth,
            parent_id: resolve_parent(&arranged.items, arranged.over_ix, max_depth),
        }
    } else {
        projection.clone()
    };

    let parent_kind = match &constrained.parent_id {
        Some(parent_id) => Some(parent_id.kind()?),
        None => None,
    };
    if parent_kind != kind.parent_kind() {
        return Err(OutlineError::invalid_parent_type(kind, parent_kind));
    }

    Ok(constrained)
}
