//! Arena-Backed Outline Tree
//!
//! The Tree Model for the questionnaire builder. Nodes live in a flat arena
//! (`Vec` of slots) and the hierarchy is expressed purely as index links:
//! every node records its parent slot and an ordered list of child slots, and
//! the tree records an ordered list of root slots.
//!
//! Because parent/child edges are the single source of truth, a move is plain
//! edge relinking: detach the slot from one child list, insert it into
//! another. The entire subtree follows for free (descendants keep their
//! links), depth never needs recomputation (it is derived by walking parent
//! links), and no deep copy is ever made.
//!
//! Collapse state lives on the node but is UI-only: it affects flattening,
//! never persisted order.

use std::collections::HashMap;

use crate::models::{EntityKind, NodeId, QuestionnaireStructure};
use crate::services::error::OutlineError;

/// Arena slot index. Stable for the lifetime of a loaded tree; the arena is
/// rebuilt wholesale on every structure fetch.
pub(crate) type NodeIx = usize;

/// One node slot in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    pub(crate) id: NodeId,
    pub(crate) kind: EntityKind,
    pub(crate) title: String,
    pub(crate) collapsed: bool,
    pub(crate) parent: Option<NodeIx>,
    pub(crate) children: Vec<NodeIx>,
}

impl OutlineNode {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Where to insert a node within its new sibling list.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertPosition {
    /// First child of the new parent (or first root).
    First,
    /// Immediately before the given sibling.
    Before(NodeId),
    /// Immediately after the given sibling.
    After(NodeId),
}

/// The ordered three-level tree of sections, steps and questions.
///
/// # Examples
///
/// ```rust
/// use auditflow_outline::models::{EntityKind, NodeId, QuestionnaireStructure};
/// use auditflow_outline::tree::{InsertPosition, OutlineTree};
///
/// let structure: QuestionnaireStructure = serde_json::from_value(serde_json::json!({
///     "sections": [{
///         "id": 1, "title": "S1", "order_index": 0,
///         "steps": [
///             { "id": 10, "title": "Step A", "order_index": 0, "questions": [] },
///             { "id": 11, "title": "Step B", "order_index": 1, "questions": [] }
///         ]
///     }]
/// })).unwrap();
///
/// let mut tree = OutlineTree::from_structure(&structure);
/// let step_b = NodeId::new(EntityKind::Step, 11);
/// let section = NodeId::new(EntityKind::Section, 1);
///
/// tree.move_node(&step_b, Some(&section), InsertPosition::First).unwrap();
/// assert_eq!(tree.children_of(Some(&section))[0], step_b);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineTree {
    nodes: Vec<OutlineNode>,
    roots: Vec<NodeIx>,
    index: HashMap<NodeId, NodeIx>,
}

impl OutlineTree {
    /// Build the tree from a fetched structure document.
    ///
    /// Every level is ordered by `order_index` ascending; ties keep the input
    /// order (stable sort). All nodes start expanded.
    pub fn from_structure(structure: &QuestionnaireStructure) -> Self {
        let mut tree = OutlineTree::default();

        let mut sections: Vec<_> = structure.sections.iter().collect();
        sections.sort_by_key(|s| s.order_index);

        for section in sections {
            let section_ix = tree.push_node(
                NodeId::new(EntityKind::Section, section.id),
                EntityKind::Section,
                &section.title,
                None,
            );

            let mut steps: Vec<_> = section.steps.iter().collect();
            steps.sort_by_key(|s| s.order_index);

            for step in steps {
                let step_ix = tree.push_node(
                    NodeId::new(EntityKind::Step, step.id),
                    EntityKind::Step,
                    &step.title,
                    Some(section_ix),
                );

                let mut questions: Vec<_> = step.questions.iter().collect();
                questions.sort_by_key(|q| q.order_index);

                for question in questions {
                    tree.push_node(
                        NodeId::new(EntityKind::Question, question.id),
                        EntityKind::Question,
                        &question.title,
                        Some(step_ix),
                    );
                }
            }
        }

        tree
    }

    fn push_node(
        &mut self,
        id: NodeId,
        kind: EntityKind,
        title: &str,
        parent: Option<NodeIx>,
    ) -> NodeIx {
        let ix = self.nodes.len();
        self.nodes.push(OutlineNode {
            id: id.clone(),
            kind,
            title: title.to_string(),
            collapsed: false,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent_ix) => self.nodes[parent_ix].children.push(ix),
            None => self.roots.push(ix),
        }
        self.index.insert(id, ix);
        ix
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&OutlineNode> {
        self.index.get(id).map(|&ix| &self.nodes[ix])
    }

    pub(crate) fn node_at(&self, ix: NodeIx) -> &OutlineNode {
        &self.nodes[ix]
    }

    pub(crate) fn root_slots(&self) -> &[NodeIx] {
        &self.roots
    }

    fn resolve(&self, id: &NodeId) -> Result<NodeIx, OutlineError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| OutlineError::not_found(id))
    }

    /// Direct parent id, or `None` for roots (and for unknown ids).
    pub fn parent_of(&self, id: &NodeId) -> Option<NodeId> {
        let ix = *self.index.get(id)?;
        self.nodes[ix]
            .parent
            .map(|parent_ix| self.nodes[parent_ix].id.clone())
    }

    /// Derived depth: number of parent links above the node (roots are 0).
    pub fn depth_of(&self, id: &NodeId) -> Option<usize> {
        let mut ix = *self.index.get(id)?;
        let mut depth = 0;
        while let Some(parent_ix) = self.nodes[ix].parent {
            depth += 1;
            ix = parent_ix;
        }
        Some(depth)
    }

    /// Ordered child ids of a parent, or the root list for `None`.
    pub fn children_of(&self, parent: Option<&NodeId>) -> Vec<NodeId> {
        let slots = match parent {
            None => &self.roots,
            Some(id) => match self.index.get(id) {
                Some(&ix) => &self.nodes[ix].children,
                None => return Vec::new(),
            },
        };
        slots.iter().map(|&ix| self.nodes[ix].id.clone()).collect()
    }

    /// All descendant ids of a node, preorder, excluding the node itself.
    pub fn descendant_ids(&self, id: &NodeId) -> Vec<NodeId> {
        let Some(&ix) = self.index.get(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<NodeIx> = self.nodes[ix].children.iter().rev().copied().collect();
        while let Some(ix) = stack.pop() {
            out.push(self.nodes[ix].id.clone());
            stack.extend(self.nodes[ix].children.iter().rev().copied());
        }
        out
    }

    /// Whether `candidate` sits inside the subtree rooted at `ancestor`
    /// (a node is not its own descendant).
    pub fn is_descendant(&self, ancestor: &NodeId, candidate: &NodeId) -> bool {
        let (Some(&ancestor_ix), Some(&candidate_ix)) =
            (self.index.get(ancestor), self.index.get(candidate))
        else {
            return false;
        };
        let mut ix = candidate_ix;
        while let Some(parent_ix) = self.nodes[ix].parent {
            if parent_ix == ancestor_ix {
                return true;
            }
            ix = parent_ix;
        }
        false
    }

    /// Set a node's collapse state. Returns `false` for unknown ids.
    pub fn set_collapsed(&mut self, id: &NodeId, collapsed: bool) -> bool {
        match self.index.get(id) {
            Some(&ix) => {
                self.nodes[ix].collapsed = collapsed;
                true
            }
            None => false,
        }
    }

    /// Flip a node's collapse state. Returns the new state, or `None` for
    /// unknown ids.
    pub fn toggle_collapsed(&mut self, id: &NodeId) -> Option<bool> {
        let &ix = self.index.get(id)?;
        self.nodes[ix].collapsed = !self.nodes[ix].collapsed;
        Some(self.nodes[ix].collapsed)
    }

    /// Relink a node (with its whole subtree) under a new parent at the given
    /// sibling position. `new_parent = None` inserts at root level.
    ///
    /// All validation happens before any mutation, so a failed move leaves
    /// the tree exactly as it was:
    ///
    /// - the node and the new parent must exist (`NotFound`);
    /// - the new parent must not lie inside the moved subtree, and a node
    ///   cannot become its own parent (`CircularMove`);
    /// - a `Before`/`After` sibling must exist and actually be a child of the
    ///   new parent (`NotFound`).
    pub fn move_node(
        &mut self,
        id: &NodeId,
        new_parent: Option<&NodeId>,
        position: InsertPosition,
    ) -> Result<(), OutlineError> {
        let node_ix = self.resolve(id)?;

        let parent_ix = match new_parent {
            Some(parent_id) => {
                if parent_id == id || self.is_descendant(id, parent_id) {
                    return Err(OutlineError::circular_move(id));
                }
                Some(self.resolve(parent_id)?)
            }
            None => None,
        };

        // Validate the anchor sibling against the *post-detach* sibling list:
        // membership is checked now, the index is computed after detaching.
        if let InsertPosition::Before(sibling) | InsertPosition::After(sibling) = &position {
            let sibling_ix = self.resolve(sibling)?;
            if sibling_ix == node_ix || self.nodes[sibling_ix].parent != parent_ix {
                return Err(OutlineError::not_found(sibling));
            }
        }

        // Detach from the current sibling list.
        let old_parent_ix = self.nodes[node_ix].parent;
        let old_list = match old_parent_ix {
            Some(ix) => &mut self.nodes[ix].children,
            None => &mut self.roots,
        };
        old_list.retain(|&ix| ix != node_ix);

        // Reinsert into the new sibling list.
        let target = match parent_ix {
            Some(ix) => &self.nodes[ix].children,
            None => &self.roots,
        };
        let insert_ix = match &position {
            InsertPosition::First => 0,
            InsertPosition::Before(sibling) => {
                let sibling_ix = self.index[sibling];
                target.iter().position(|&ix| ix == sibling_ix).unwrap_or(0)
            }
            InsertPosition::After(sibling) => {
                let sibling_ix = self.index[sibling];
                target
                    .iter()
                    .position(|&ix| ix == sibling_ix)
                    .map(|pos| pos + 1)
                    .unwrap_or(target.len())
            }
        };
        match parent_ix {
            Some(ix) => self.nodes[ix].children.insert(insert_ix, node_ix),
            None => self.roots.insert(insert_ix, node_ix),
        }
        self.nodes[node_ix].parent = parent_ix;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::test_support::sample_tree;

    fn id(raw: &str) -> NodeId {
        raw.parse().unwrap()
    }

    #[test]
    fn test_from_structure_orders_by_order_index() {
        // sample_tree: Section1[Step1[Q1, Q2], Step2[Q3]]
        let tree = sample_tree();
        assert_eq!(tree.len(), 6);
        assert_eq!(
            tree.children_of(Some(&id("section_1"))),
            vec![id("step_1"), id("step_2")]
        );
        assert_eq!(
            tree.children_of(Some(&id("step_1"))),
            vec![id("question_1"), id("question_2")]
        );
    }

    #[test]
    fn test_depth_is_derived_from_parent_links() {
        let tree = sample_tree();
        assert_eq!(tree.depth_of(&id("section_1")), Some(0));
        assert_eq!(tree.depth_of(&id("step_2")), Some(1));
        assert_eq!(tree.depth_of(&id("question_3")), Some(2));
    }

    #[test]
    fn test_move_within_same_parent() {
        let mut tree = sample_tree();
        tree.move_node(
            &id("step_2"),
            Some(&id("section_1")),
            InsertPosition::Before(id("step_1")),
        )
        .unwrap();

        assert_eq!(
            tree.children_of(Some(&id("section_1"))),
            vec![id("step_2"), id("step_1")]
        );
    }

    #[test]
    fn test_move_carries_whole_subtree() {
        let mut tree = sample_tree();
        let descendants_before = tree.descendant_ids(&id("step_1"));

        tree.move_node(
            &id("step_1"),
            Some(&id("section_1")),
            InsertPosition::After(id("step_2")),
        )
        .unwrap();

        assert_eq!(tree.descendant_ids(&id("step_1")), descendants_before);
        assert_eq!(tree.parent_of(&id("question_1")), Some(id("step_1")));
        assert_eq!(tree.depth_of(&id("question_1")), Some(2));
    }

    #[test]
    fn test_move_across_parents_updates_depths() {
        let mut tree = sample_tree();
        tree.move_node(
            &id("question_1"),
            Some(&id("step_2")),
            InsertPosition::After(id("question_3")),
        )
        .unwrap();

        assert_eq!(tree.parent_of(&id("question_1")), Some(id("step_2")));
        assert_eq!(tree.depth_of(&id("question_1")), Some(2));
        assert_eq!(
            tree.children_of(Some(&id("step_2"))),
            vec![id("question_3"), id("question_1")]
        );
        assert_eq!(
            tree.children_of(Some(&id("step_1"))),
            vec![id("question_2")]
        );
    }

    #[test]
    fn test_move_into_own_subtree_is_rejected_and_noop() {
        let mut tree = sample_tree();
        let before = tree.clone();

        let err = tree
            .move_node(&id("step_1"), Some(&id("question_1")), InsertPosition::First)
            .unwrap_err();
        assert!(matches!(err, OutlineError::CircularMove { .. }));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_move_with_foreign_anchor_sibling_is_rejected_and_noop() {
        let mut tree = sample_tree();
        let before = tree.clone();

        // question_3 is not a child of step_1, so it cannot anchor an insert there.
        let err = tree
            .move_node(
                &id("question_2"),
                Some(&id("step_1")),
                InsertPosition::After(id("question_3")),
            )
            .unwrap_err();
        assert!(matches!(err, OutlineError::NotFound { .. }));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_move_unknown_node_is_not_found() {
        let mut tree = sample_tree();
        let err = tree
            .move_node(&id("question_99"), Some(&id("step_1")), InsertPosition::First)
            .unwrap_err();
        assert!(matches!(err, OutlineError::NotFound { .. }));
    }

    #[test]
    fn test_depth_invariant_after_move_sequence() {
        let mut tree = sample_tree();
        tree.move_node(
            &id("question_2"),
            Some(&id("step_2")),
            InsertPosition::First,
        )
        .unwrap();
        tree.move_node(
            &id("step_2"),
            Some(&id("section_1")),
            InsertPosition::Before(id("step_1")),
        )
        .unwrap();

        for raw in [
            "section_1",
            "step_1",
            "step_2",
            "question_1",
            "question_2",
            "question_3",
        ] {
            let node_id = id(raw);
            let depth = tree.depth_of(&node_id).unwrap();
            match tree.parent_of(&node_id) {
                Some(parent) => {
                    assert_eq!(depth, tree.depth_of(&parent).unwrap() + 1);
                    assert_eq!(
                        tree.node(&parent).unwrap().kind(),
                        tree.node(&node_id).unwrap().kind().parent_kind().unwrap()
                    );
                }
                None => assert_eq!(depth, 0),
            }
        }
    }

    #[test]
    fn test_collapse_toggle() {
        let mut tree = sample_tree();
        assert_eq!(tree.toggle_collapsed(&id("step_1")), Some(true));
        assert!(tree.node(&id("step_1")).unwrap().is_collapsed());
        assert_eq!(tree.toggle_collapsed(&id("step_1")), Some(false));
        assert_eq!(tree.toggle_collapsed(&id("step_99")), None);
    }
}
