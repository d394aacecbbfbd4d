//! Reorder-Patch Builder
//!
//! Diffs sibling order around a completed move and emits the set of
//! `order_index`/`parent_id` writes the persistence boundary needs. The
//! builder deliberately re-emits every sibling of the touched parents, even
//! ones whose index did not change: the endpoint applies entries as an
//! idempotent upsert-by-id, and full re-emission keeps indices contiguous
//! without bookkeeping.

use crate::models::{NodeId, ReorderEntry};
use crate::services::error::OutlineError;

use super::arena::OutlineTree;

/// Build the reorder patch for the move of `moved` from `old` to `new`.
///
/// - the moved node always gets an entry, carrying `parent_id` only when its
///   parent actually changed;
/// - every sibling under the moved node's *new* parent is re-emitted with its
///   current 0-based index;
/// - when the parent changed, every remaining sibling under the *old* parent
///   is re-emitted too (their indices shifted down by one).
///
/// Entry order in the returned list is insignificant; the consumer applies
/// the patch as a set.
pub fn diff_order(
    old: &OutlineTree,
    new: &OutlineTree,
    moved: &NodeId,
) -> Result<Vec<ReorderEntry>, OutlineError> {
    if !old.contains(moved) || !new.contains(moved) {
        return Err(OutlineError::not_found(moved));
    }

    let old_parent = old.parent_of(moved);
    let new_parent = new.parent_of(moved);
    let parent_changed = old_parent != new_parent;

    let mut entries = Vec::new();

    for (position, sibling) in new.children_of(new_parent.as_ref()).iter().enumerate() {
        let (kind, entity_id) = sibling.parse()?;
        let entry = if sibling == moved && parent_changed {
            match &new_parent {
                Some(parent) => {
                    ReorderEntry::reparent(kind, entity_id, position as i64, parent.entity_id()?)
                }
                // Reparenting to root never happens in the three-level
                // schema; fall back to a plain reindex.
                None => ReorderEntry::reindex(kind, entity_id, position as i64),
            }
        } else {
            ReorderEntry::reindex(kind, entity_id, position as i64)
        };
        entries.push(entry);
    }

    if parent_changed {
        for (position, sibling) in new.children_of(old_parent.as_ref()).iter().enumerate() {
            let (kind, entity_id) = sibling.parse()?;
            entries.push(ReorderEntry::reindex(kind, entity_id, position as i64));
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;
    use crate::tree::arena::InsertPosition;
    use crate::tree::test_support::sample_tree;

    fn id(raw: &str) -> NodeId {
        raw.parse().unwrap()
    }

    fn entry_for(entries: &[ReorderEntry], kind: EntityKind, entity_id: i64) -> &ReorderEntry {
        entries
            .iter()
            .find(|e| e.kind == kind && e.id == entity_id)
            .unwrap()
    }

    #[test]
    fn test_same_parent_move_reindexes_siblings_only() {
        // Drag step_2 before step_1: both steps stay under section_1.
        let old = sample_tree();
        let mut new = old.clone();
        new.move_node(
            &id("step_2"),
            Some(&id("section_1")),
            InsertPosition::Before(id("step_1")),
        )
        .unwrap();

        let entries = diff_order(&old, &new, &id("step_2")).unwrap();
        assert_eq!(entries.len(), 2);

        let step2 = entry_for(&entries, EntityKind::Step, 2);
        assert_eq!(step2.order_index, 0);
        assert_eq!(step2.parent_id, None);

        let step1 = entry_for(&entries, EntityKind::Step, 1);
        assert_eq!(step1.order_index, 1);
        assert_eq!(step1.parent_id, None);
    }

    #[test]
    fn test_cross_parent_move_emits_both_sibling_lists() {
        // Drag question_1 out of step_1 into step_2, after question_3.
        let old = sample_tree();
        let mut new = old.clone();
        new.move_node(
            &id("question_1"),
            Some(&id("step_2")),
            InsertPosition::After(id("question_3")),
        )
        .unwrap();

        let entries = diff_order(&old, &new, &id("question_1")).unwrap();
        // New parent has 2 children, old parent has 1 remaining.
        assert_eq!(entries.len(), 3);

        let moved = entry_for(&entries, EntityKind::Question, 1);
        assert_eq!(moved.order_index, 1);
        assert_eq!(moved.parent_id, Some(2));

        let q3 = entry_for(&entries, EntityKind::Question, 3);
        assert_eq!(q3.order_index, 0);
        assert_eq!(q3.parent_id, None);

        let q2 = entry_for(&entries, EntityKind::Question, 2);
        assert_eq!(q2.order_index, 0);
        assert_eq!(q2.parent_id, None);
    }

    #[test]
    fn test_indices_are_contiguous_per_parent() {
        let old = sample_tree();
        let mut new = old.clone();
        new.move_node(
            &id("question_3"),
            Some(&id("step_1")),
            InsertPosition::First,
        )
        .unwrap();

        let entries = diff_order(&old, &new, &id("question_3")).unwrap();
        // step_1 now has 3 questions, step_2 has 0 remaining: 3 entries.
        assert_eq!(entries.len(), 3);

        let mut step1_indices: Vec<i64> = entries
            .iter()
            .filter(|e| e.kind == EntityKind::Question)
            .map(|e| e.order_index)
            .collect();
        step1_indices.sort_unstable();
        assert_eq!(step1_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_unmoved_sibling_entries_are_still_emitted() {
        // Re-dropping a node onto its own slot re-emits its sibling list
        // unchanged; the endpoint treats the write as an idempotent upsert.
        let old = sample_tree();
        let new = old.clone();

        let entries = diff_order(&old, &new, &id("question_2")).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entry_for(&entries, EntityKind::Question, 1).order_index, 0);
        assert_eq!(entry_for(&entries, EntityKind::Question, 2).order_index, 1);
    }

    #[test]
    fn test_unknown_moved_node_is_not_found() {
        let old = sample_tree();
        let new = old.clone();
        let err = diff_order(&old, &new, &id("question_9")).unwrap_err();
        assert!(matches!(err, OutlineError::NotFound { .. }));
    }
}
