//! Persistence Boundary
//!
//! The outline core does not own storage: the questionnaire structure lives
//! behind the AuditFlow API. This module defines the [`StructureStore`]
//! trait that abstracts that boundary (fetch the nested structure, persist a
//! reorder patch) and an in-memory implementation used by tests and local
//! previews.

mod memory_store;
mod structure_store;

pub use memory_store::MemoryStructureStore;
pub use structure_store::StructureStore;
