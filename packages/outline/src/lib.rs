//! AuditFlow Questionnaire Outline Core
//!
//! This crate provides the sortable tree behind the questionnaire builder:
//! the section/step/question outline, its drag-and-drop reorder pipeline, and
//! the persistence boundary for reorder patches.
//!
//! # Architecture
//!
//! - **Arena tree**: nodes in a flat arena, hierarchy as index links; a move
//!   is edge relinking, never a deep copy
//! - **Derived rendering**: the flattened row sequence and placeholder rows
//!   are computed from the tree, never stored
//! - **Schema-constrained drops**: each entity kind has one legal depth and
//!   parent kind; illegal drops are rejected, never coerced
//! - **Optimistic persistence**: drops mutate the tree immediately and the
//!   reorder patch is written in the background, with no rollback on failure
//!
//! # Modules
//!
//! - [`models`] - Data structures (node ids, structure DTOs, patch entries)
//! - [`tree`] - The arena tree and the drag algorithms
//! - [`services`] - OutlineService orchestration, events, errors
//! - [`store`] - Persistence boundary (StructureStore trait + in-memory impl)

pub mod models;
pub mod services;
pub mod store;
pub mod tree;

// Re-export commonly used types
pub use models::*;
pub use services::*;
pub use tree::*;
