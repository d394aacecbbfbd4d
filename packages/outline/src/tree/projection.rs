//! Projection Calculator
//!
//! Computes the candidate `(depth, parent)` a dragged row would land at,
//! from the row it currently hovers over and the horizontal distance the
//! pointer has travelled. Standard outline-editor semantics: vertical
//! position picks the slot, horizontal offset picks the indentation level
//! (one level per `indent_width` logical pixels).
//!
//! The calculator is domain-free: it knows nothing about sections, steps or
//! questions. Domain legality is applied afterwards by
//! [`crate::tree::constraints::constrain`].

use crate::models::NodeId;
use crate::services::error::OutlineError;

use super::flatten::FlattenedItem;

/// Candidate landing position for the dragged row, before domain clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct DragProjection {
    pub depth: usize,
    pub parent_id: Option<NodeId>,
}

/// The flattened sequence rearranged for drop-slot reasoning: the dragged
/// row's descendants are removed, and the dragged row itself is relocated to
/// the hover slot.
#[derive(Debug, Clone)]
pub(crate) struct Arranged {
    pub items: Vec<FlattenedItem>,
    /// Index of the dragged row within `items`.
    pub over_ix: usize,
    /// Depth the dragged row had at drag start.
    pub active_depth: usize,
}

/// Compute the candidate projection for a drag.
///
/// `drag_offset_x` is the horizontal pointer travel since drag start
/// (positive = rightwards); `indent_width` is the per-level indentation in
/// the same units. Fails with [`OutlineError::NotFound`] when either id is
/// absent from the sequence (a row inside the dragged subtree counts as
/// absent: it is not a drop target).
pub fn project(
    items: &[FlattenedItem],
    active_id: &NodeId,
    over_id: &NodeId,
    drag_offset_x: f32,
    indent_width: f32,
) -> Result<DragProjection, OutlineError> {
    let arranged = arrange(items, active_id, over_id)?;
    Ok(project_arranged(&arranged, drag_offset_x, indent_width))
}

/// Build the [`Arranged`] view of the sequence for the given drag.
pub(crate) fn arrange(
    items: &[FlattenedItem],
    active_id: &NodeId,
    over_id: &NodeId,
) -> Result<Arranged, OutlineError> {
    let active_pos = items
        .iter()
        .position(|item| &item.node_id == active_id)
        .ok_or_else(|| OutlineError::not_found(active_id))?;
    let active_depth = items[active_pos].depth;

    // End of the dragged subtree in the flattened sequence.
    let mut subtree_end = active_pos + 1;
    while subtree_end < items.len() && items[subtree_end].depth > active_depth {
        subtree_end += 1;
    }

    // Candidate rows: everything except the dragged row's descendants.
    let mut candidates: Vec<FlattenedItem> = Vec::with_capacity(items.len());
    candidates.extend_from_slice(&items[..active_pos + 1]);
    candidates.extend_from_slice(&items[subtree_end..]);

    let over_pos = candidates
        .iter()
        .position(|item| &item.node_id == over_id)
        .ok_or_else(|| OutlineError::not_found(over_id))?;

    // Relocate the dragged row to the hover slot.
    let active_item = candidates.remove(active_pos);
    let over_ix = over_pos.min(candidates.len());
    candidates.insert(over_ix, active_item);

    Ok(Arranged {
        items: candidates,
        over_ix,
        active_depth,
    })
}

/// Projection over an already-arranged sequence.
pub(crate) fn project_arranged(
    arranged: &Arranged,
    drag_offset_x: f32,
    indent_width: f32,
) -> DragProjection {
    let items = &arranged.items;
    let over_ix = arranged.over_ix;

    let drag_depth = (drag_offset_x / indent_width).round() as isize;
    let projected = arranged.active_depth as isize + drag_depth;

    // You cannot indent deeper than one level below the row immediately above
    // the drop slot, nor shallower than the row immediately below it.
    let max_depth = if over_ix == 0 {
        0
    } else {
        items[over_ix - 1].depth + 1
    };
    let min_depth = items.get(over_ix + 1).map(|item| item.depth).unwrap_or(0);

    let depth = if projected >= max_depth as isize {
        max_depth
    } else if projected < min_depth as isize {
        min_depth
    } else {
        projected as usize
    };

    DragProjection {
        depth,
        parent_id: resolve_parent(items, over_ix, depth),
    }
}

/// Resolve the parent for a drop at `depth`: the nearest preceding row one
/// level up becomes the parent; a preceding row at the same depth donates its
/// parent (sibling case); otherwise scan backwards for the first row at the
/// target depth.
pub(crate) fn resolve_parent(
    items: &[FlattenedItem],
    over_ix: usize,
    depth: usize,
) -> Option<NodeId> {
    if depth == 0 || over_ix == 0 {
        return None;
    }
    let previous = &items[over_ix - 1];
    if depth == previous.depth {
        return previous.parent_id.clone();
    }
    if depth > previous.depth {
        return Some(previous.node_id.clone());
    }
    items[..over_ix]
        .iter()
        .rev()
        .find(|item| item.depth == depth)
        .and_then(|item| item.parent_id.clone())
}
