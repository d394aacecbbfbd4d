//! StructureStore Trait - Persistence Abstraction Layer
//!
//! Abstracts the two operations the outline core needs from the AuditFlow
//! API: fetching a questionnaire's nested structure and persisting a reorder
//! patch. Implementations are backends (HTTP client in the application
//! shell, [`super::MemoryStructureStore`] in tests); the outline service
//! never knows which one it talks to.
//!
//! All methods are async: the real backend is a network call. Errors use
//! `anyhow::Result` so backends can attach whatever context they have
//! (status codes, payload snippets) without this crate prescribing a shape.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{QuestionnaireStructure, ReorderEntry};

/// Abstraction over the questionnaire structure boundary
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: the persistence call is spawned
/// onto the runtime and may run on any worker thread.
///
/// # Idempotency
///
/// `persist_reorder` must behave as an upsert-by-id: applying the same patch
/// twice produces the same final order. The outline core relies on this and
/// re-emits unchanged sibling entries rather than minimizing the patch.
#[async_trait]
pub trait StructureStore: Send + Sync {
    /// Fetch the full nested structure of a questionnaire, ordered by
    /// `order_index` ascending at every level.
    async fn fetch_structure(&self, questionnaire_id: i64) -> Result<QuestionnaireStructure>;

    /// Persist a reorder patch. Entries form a set; application order must
    /// not matter.
    async fn persist_reorder(&self, entries: &[ReorderEntry]) -> Result<()>;
}
