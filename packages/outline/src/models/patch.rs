//! Reorder Patch Entries
//!
//! The unit exchanged with the persistence boundary after a drop: one entry
//! per entity whose `order_index` (and possibly parent) must be written. The
//! endpoint treats a reorder write as an idempotent upsert-by-id, so entries
//! form a set; their order in the list is insignificant.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};

/// One order/parent assignment for a single entity.
///
/// `parent_id` is present only when the entity actually changed parent; plain
/// sibling reindexes omit it.
///
/// Wire shape (matching the `POST reorder` endpoint):
///
/// ```json
/// { "id": 7, "type": "question", "order_index": 1, "parent_id": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: EntityId,

    #[serde(rename = "type")]
    pub kind: EntityKind,

    pub order_index: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
}

impl ReorderEntry {
    /// Entry that only rewrites an entity's position among its siblings.
    pub fn reindex(kind: EntityKind, id: EntityId, order_index: i64) -> Self {
        Self {
            id,
            kind,
            order_index,
            parent_id: None,
        }
    }

    /// Entry that moves an entity under a new parent at the given position.
    pub fn reparent(kind: EntityKind, id: EntityId, order_index: i64, parent_id: EntityId) -> Self {
        Self {
            id,
            kind,
            order_index,
            parent_id: Some(parent_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_id_omitted_when_absent() {
        let entry = ReorderEntry::reindex(EntityKind::Step, 5, 2);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "step");
        assert_eq!(json["order_index"], 2);
        assert!(json.get("parent_id").is_none());
    }

    #[test]
    fn test_parent_id_serialized_when_present() {
        let entry = ReorderEntry::reparent(EntityKind::Question, 9, 0, 4);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["parent_id"], 4);
    }
}
