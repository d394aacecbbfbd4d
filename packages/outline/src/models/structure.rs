//! Questionnaire Structure DTOs
//!
//! Shape of the structure document returned by the AuditFlow API
//! (`GET /questionnaires/:id/structure`): sections containing steps containing
//! questions, each level ordered by `order_index` ascending.
//!
//! These types are pure transport. The outline core converts them into its
//! arena tree (see [`crate::tree::OutlineTree::from_structure`]) and never
//! mutates them in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Full nested structure of one questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireStructure {
    pub sections: Vec<SectionData>,
}

/// A top-level section with its ordered steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionData {
    pub id: EntityId,
    pub title: String,
    pub order_index: i64,

    /// Last server-side modification; inert to the outline algorithms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub steps: Vec<StepData>,
}

/// A step inside a section with its ordered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepData {
    pub id: EntityId,
    pub title: String,
    pub order_index: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub questions: Vec<QuestionData>,
}

/// A leaf question inside a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionData {
    pub id: EntityId,
    pub title: String,
    pub order_index: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structure_deserializes_from_api_shape() {
        let payload = json!({
            "sections": [
                {
                    "id": 1,
                    "title": "Asset management",
                    "order_index": 0,
                    "steps": [
                        {
                            "id": 10,
                            "title": "Inventory",
                            "order_index": 0,
                            "questions": [
                                { "id": 100, "title": "Is an asset register kept?", "order_index": 0 }
                            ]
                        }
                    ]
                }
            ]
        });

        let structure: QuestionnaireStructure = serde_json::from_value(payload).unwrap();
        assert_eq!(structure.sections.len(), 1);
        assert_eq!(structure.sections[0].steps[0].questions[0].id, 100);
    }

    #[test]
    fn test_missing_child_lists_default_to_empty() {
        let payload = json!({
            "sections": [
                { "id": 2, "title": "Empty section", "order_index": 0 }
            ]
        });

        let structure: QuestionnaireStructure = serde_json::from_value(payload).unwrap();
        assert!(structure.sections[0].steps.is_empty());
    }
}
