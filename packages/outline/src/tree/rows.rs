//! Placeholder Injector
//!
//! Interleaves synthetic "add child" affordances into the rendered row
//! sequence. Placeholders are a render-only convenience: they are never part
//! of the persisted tree, never drag sources or targets, and never reach the
//! patch builder. The row type is a tagged union so downstream consumers
//! cannot mistake a placeholder for a draggable item.

use crate::models::NodeId;

use super::arena::{NodeIx, OutlineTree};
use super::flatten::FlattenedItem;

/// Which "add child" affordance a placeholder row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderSlot {
    AddSection,
    AddStep,
    AddQuestion,
}

impl PlaceholderSlot {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceholderSlot::AddSection => "Add Section",
            PlaceholderSlot::AddStep => "Add Step",
            PlaceholderSlot::AddQuestion => "Add Question",
        }
    }
}

/// A synthetic non-draggable row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderRow {
    pub slot: PlaceholderSlot,
    /// The node the affordance would create a child under (`None` for
    /// "Add Section").
    pub parent: Option<NodeId>,
    pub depth: usize,
}

/// One rendered row: a real outline item or an injected placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineRow {
    Item(FlattenedItem),
    Placeholder(PlaceholderRow),
}

impl OutlineRow {
    pub fn as_item(&self) -> Option<&FlattenedItem> {
        match self {
            OutlineRow::Item(item) => Some(item),
            OutlineRow::Placeholder(_) => None,
        }
    }
}

/// Flatten the tree and interleave placeholder rows.
///
/// Placement: "Add Question" follows the last question of every expanded
/// step (or sits alone inside an empty expanded step); "Add Step" follows
/// the full subtree of the last step in every expanded section; "Add
/// Section" is always the final row. Placeholders inside a collapsed subtree
/// are not emitted, matching the flattener's omission of collapsed
/// descendants.
pub fn rows_with_placeholders(tree: &OutlineTree) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    let mut index = 0;

    for &section_ix in tree.root_slots() {
        push_section(tree, section_ix, &mut rows, &mut index);
    }

    rows.push(OutlineRow::Placeholder(PlaceholderRow {
        slot: PlaceholderSlot::AddSection,
        parent: None,
        depth: 0,
    }));

    rows
}

fn push_item(
    tree: &OutlineTree,
    ix: NodeIx,
    depth: usize,
    parent_id: Option<&NodeId>,
    rows: &mut Vec<OutlineRow>,
    index: &mut usize,
) {
    let node = tree.node_at(ix);
    rows.push(OutlineRow::Item(FlattenedItem {
        node_id: node.id().clone(),
        kind: node.kind(),
        parent_id: parent_id.cloned(),
        depth,
        index: *index,
        collapsed: node.is_collapsed(),
        has_children: node.has_children(),
        title: node.title().to_string(),
    }));
    *index += 1;
}

fn push_section(
    tree: &OutlineTree,
    section_ix: NodeIx,
    rows: &mut Vec<OutlineRow>,
    index: &mut usize,
) {
    push_item(tree, section_ix, 0, None, rows, index);

    let section = tree.node_at(section_ix);
    if section.is_collapsed() {
        return;
    }
    let section_id = section.id().clone();

    for &step_ix in &section.children {
        push_item(tree, step_ix, 1, Some(&section_id), rows, index);

        let step = tree.node_at(step_ix);
        if step.is_collapsed() {
            continue;
        }
        let step_id = step.id().clone();

        for &question_ix in &step.children {
            push_item(tree, question_ix, 2, Some(&step_id), rows, index);
        }

        rows.push(OutlineRow::Placeholder(PlaceholderRow {
            slot: PlaceholderSlot::AddQuestion,
            parent: Some(step_id),
            depth: 2,
        }));
    }

    rows.push(OutlineRow::Placeholder(PlaceholderRow {
        slot: PlaceholderSlot::AddStep,
        parent: Some(section_id),
        depth: 1,
    }));
}
