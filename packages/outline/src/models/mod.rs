//! Data Structures
//!
//! This module contains the data types exchanged between the outline core and
//! the AuditFlow API boundary:
//!
//! - [`entity`] - Entity kinds (section/step/question) and composite node ids
//! - [`structure`] - Nested questionnaire structure DTOs (fetch shape)
//! - [`patch`] - Reorder patch entries (persist shape)

pub mod entity;
pub mod patch;
pub mod structure;

pub use entity::{EntityId, EntityKind, IdParseError, NodeId};
pub use patch::ReorderEntry;
pub use structure::{QuestionData, QuestionnaireStructure, SectionData, StepData};
