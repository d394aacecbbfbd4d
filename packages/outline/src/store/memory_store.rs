//! In-Memory Structure Store
//!
//! A [`StructureStore`] over a plain in-memory structure document. Used by
//! the service tests (verifying that the persisted order converges with the
//! optimistic tree) and handy for local previews without a backend.
//!
//! The reorder application mirrors the endpoint contract: entries are an
//! idempotent upsert-by-id set. Reparenting entries are applied first, then
//! every `order_index` write, then each sibling list is re-sorted; the net
//! result is independent of entry order and stable under re-application.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::{
    EntityKind, QuestionData, QuestionnaireStructure, ReorderEntry, StepData,
};

use super::structure_store::StructureStore;

/// In-memory [`StructureStore`] backed by a single structure document.
pub struct MemoryStructureStore {
    inner: Mutex<QuestionnaireStructure>,
}

impl MemoryStructureStore {
    pub fn new(structure: QuestionnaireStructure) -> Self {
        Self {
            inner: Mutex::new(structure),
        }
    }

    /// Snapshot of the current document (sorted by `order_index` at every
    /// level), for test assertions.
    pub fn snapshot(&self) -> QuestionnaireStructure {
        let mut structure = self.inner.lock().expect("structure lock poisoned").clone();
        sort_levels(&mut structure);
        structure
    }
}

fn sort_levels(structure: &mut QuestionnaireStructure) {
    structure.sections.sort_by_key(|s| s.order_index);
    for section in &mut structure.sections {
        section.steps.sort_by_key(|s| s.order_index);
        for step in &mut section.steps {
            step.questions.sort_by_key(|q| q.order_index);
        }
    }
}

fn detach_step(structure: &mut QuestionnaireStructure, id: i64) -> Option<StepData> {
    for section in &mut structure.sections {
        if let Some(pos) = section.steps.iter().position(|s| s.id == id) {
            return Some(section.steps.remove(pos));
        }
    }
    None
}

fn detach_question(structure: &mut QuestionnaireStructure, id: i64) -> Option<QuestionData> {
    for section in &mut structure.sections {
        for step in &mut section.steps {
            if let Some(pos) = step.questions.iter().position(|q| q.id == id) {
                return Some(step.questions.remove(pos));
            }
        }
    }
    None
}

fn apply_reparent(structure: &mut QuestionnaireStructure, entry: &ReorderEntry) -> Result<()> {
    let Some(parent_id) = entry.parent_id else {
        return Ok(());
    };
    match entry.kind {
        EntityKind::Section => {
            bail!("section {} cannot have a parent", entry.id);
        }
        EntityKind::Step => {
            let Some(step) = detach_step(structure, entry.id) else {
                bail!("unknown step in reorder patch: {}", entry.id);
            };
            let Some(section) = structure.sections.iter_mut().find(|s| s.id == parent_id)
            else {
                bail!("unknown section in reorder patch: {}", parent_id);
            };
            section.steps.push(step);
        }
        EntityKind::Question => {
            let Some(question) = detach_question(structure, entry.id) else {
                bail!("unknown question in reorder patch: {}", entry.id);
            };
            let Some(step) = structure
                .sections
                .iter_mut()
                .flat_map(|s| s.steps.iter_mut())
                .find(|s| s.id == parent_id)
            else {
                bail!("unknown step in reorder patch: {}", parent_id);
            };
            step.questions.push(question);
        }
    }
    Ok(())
}

fn apply_order_index(structure: &mut QuestionnaireStructure, entry: &ReorderEntry) -> Result<()> {
    match entry.kind {
        EntityKind::Section => {
            let Some(section) = structure.sections.iter_mut().find(|s| s.id == entry.id)
            else {
                bail!("unknown section in reorder patch: {}", entry.id);
            };
            section.order_index = entry.order_index;
        }
        EntityKind::Step => {
            let Some(step) = structure
                .sections
                .iter_mut()
                .flat_map(|s| s.steps.iter_mut())
                .find(|s| s.id == entry.id)
            else {
                bail!("unknown step in reorder patch: {}", entry.id);
            };
            step.order_index = entry.order_index;
        }
        EntityKind::Question => {
            let Some(question) = structure
                .sections
                .iter_mut()
                .flat_map(|s| s.steps.iter_mut())
                .flat_map(|s| s.questions.iter_mut())
                .find(|q| q.id == entry.id)
            else {
                bail!("unknown question in reorder patch: {}", entry.id);
            };
            question.order_index = entry.order_index;
        }
    }
    Ok(())
}

#[async_trait]
impl StructureStore for MemoryStructureStore {
    async fn fetch_structure(&self, _questionnaire_id: i64) -> Result<QuestionnaireStructure> {
        Ok(self.snapshot())
    }

    async fn persist_reorder(&self, entries: &[ReorderEntry]) -> Result<()> {
        let mut structure = self.inner.lock().expect("structure lock poisoned");

        for entry in entries.iter().filter(|e| e.parent_id.is_some()) {
            apply_reparent(&mut structure, entry)?;
        }
        for entry in entries {
            apply_order_index(&mut structure, entry)?;
        }
        sort_levels(&mut structure);

        Ok(())
    }
}
