//! Flattener
//!
//! Projects the outline tree into the single ordered sequence the builder
//! renders and the drag algorithms scan. Depth-first, sibling order
//! preserved; descendants of a collapsed node are omitted entirely (they are
//! not drop targets, not merely hidden). Purely derived: flattening an
//! unchanged tree twice yields identical sequences.

use crate::models::{EntityKind, NodeId};

use super::arena::{NodeIx, OutlineTree};

/// One visible row of the flattened outline.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedItem {
    pub node_id: NodeId,
    pub kind: EntityKind,
    /// Direct parent in the tree, `None` for sections.
    pub parent_id: Option<NodeId>,
    /// Indentation level (section 0, step 1, question 2).
    pub depth: usize,
    /// Position within the flattened sequence.
    pub index: usize,
    pub collapsed: bool,
    pub has_children: bool,
    pub title: String,
}

/// Flatten the tree into its visible row sequence.
pub fn flatten(tree: &OutlineTree) -> Vec<FlattenedItem> {
    let mut items = Vec::with_capacity(tree.len());
    for &root_ix in tree.root_slots() {
        push_subtree(tree, root_ix, 0, None, &mut items);
    }
    items
}

fn push_subtree(
    tree: &OutlineTree,
    ix: NodeIx,
    depth: usize,
    parent_id: Option<&NodeId>,
    items: &mut Vec<FlattenedItem>,
) {
    let node = tree.node_at(ix);
    items.push(FlattenedItem {
        node_id: node.id().clone(),
        kind: node.kind(),
        parent_id: parent_id.cloned(),
        depth,
        index: items.len(),
        collapsed: node.is_collapsed(),
        has_children: node.has_children(),
        title: node.title().to_string(),
    });

    if node.is_collapsed() {
        return;
    }
    let parent_id = node.id().clone();
    for &child_ix in &node.children {
        push_subtree(tree, child_ix, depth + 1, Some(&parent_id), items);
    }
}
