//! Outline Tree and Drag Algorithms
//!
//! The sortable-tree core of the questionnaire builder:
//!
//! - [`arena`] - arena-backed `OutlineTree` (model + subtree moves)
//! - [`flatten`] - tree to ordered row sequence, honoring collapse state
//! - [`projection`] - pointer geometry to candidate `(depth, parent)`
//! - [`constraints`] - section/step/question depth and parent legality
//! - [`diff`] - sibling-order diff to reorder patch entries
//! - [`rows`] - placeholder injection for rendering
//!
//! Control flow for one drag: flatten → project → constrain → move → diff.
//! [`crate::services::OutlineService`] orchestrates that sequence.

pub mod arena;
pub mod constraints;
pub mod diff;
pub mod flatten;
pub mod projection;
pub mod rows;

pub use arena::{InsertPosition, OutlineNode, OutlineTree};
pub use diff::diff_order;
pub use flatten::{flatten, FlattenedItem};
pub use projection::{project, DragProjection};
pub use rows::{rows_with_placeholders, OutlineRow, PlaceholderRow, PlaceholderSlot};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::QuestionnaireStructure;
    use serde_json::json;

    use super::OutlineTree;

    /// The worked tree from the drag scenarios:
    /// `Section1[Step1[Q1, Q2], Step2[Q3]]`.
    pub(crate) fn sample_tree() -> OutlineTree {
        let structure: QuestionnaireStructure = serde_json::from_value(json!({
            "sections": [{
                "id": 1,
                "title": "Section 1",
                "order_index": 0,
                "steps": [
                    {
                        "id": 1,
                        "title": "Step 1",
                        "order_index": 0,
                        "questions": [
                            { "id": 1, "title": "Q1", "order_index": 0 },
                            { "id": 2, "title": "Q2", "order_index": 1 }
                        ]
                    },
                    {
                        "id": 2,
                        "title": "Step 2",
                        "order_index": 1,
                        "questions": [
                            { "id": 3, "title": "Q3", "order_index": 0 }
                        ]
                    }
                ]
            }]
        }))
        .expect("sample structure is valid");
        OutlineTree::from_structure(&structure)
    }
}
