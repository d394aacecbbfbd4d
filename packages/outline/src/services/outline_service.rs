//! Outline Service
//!
//! Orchestrates the questionnaire builder's sortable tree: owns the
//! in-memory [`OutlineTree`], the transient state of the single active drag
//! gesture, and the glue to the persistence boundary.
//!
//! # Drag lifecycle
//!
//! ```text
//! drag_start(id) → drag_over(over, offset)* → drag_end() | drag_cancel()
//! ```
//!
//! `drag_end` runs the whole pipeline synchronously: flatten → project →
//! constrain → move → diff. The tree mutation is optimistic; the caller
//! hands the returned patch to [`OutlineService::persist`], which writes it
//! out in the background. A failed write is logged and surfaced as an event,
//! but the optimistic tree is kept — the next [`OutlineService::refresh`]
//! reconciles against the authoritative structure.
//!
//! Rejected drops (unknown ids, illegal parent kinds, circular moves) are
//! no-ops: the tree is untouched and the gesture state resets.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::models::{NodeId, ReorderEntry};
use crate::store::StructureStore;
use crate::tree::arena::InsertPosition;
use crate::tree::projection::{self, Arranged};
use crate::tree::{
    constraints, diff_order, flatten, rows_with_placeholders, DragProjection, FlattenedItem,
    OutlineRow, OutlineTree,
};

use super::error::OutlineError;
use super::events::OutlineEvent;

const OUTLINE_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Default horizontal distance (logical pixels) for one indentation level.
///
/// Must match the indentation used by the row renderer, or projected depths
/// drift from what the user sees.
pub const DEFAULT_INDENT_WIDTH: f32 = 24.0;

/// Transient state of the active drag gesture.
#[derive(Debug, Clone)]
struct DragState {
    active_id: NodeId,
    over_id: Option<NodeId>,
    offset_x: f32,
}

/// The questionnaire outline: tree state, drag orchestration, persistence
/// glue.
pub struct OutlineService {
    store: Arc<dyn StructureStore>,
    tree: OutlineTree,
    questionnaire_id: Option<i64>,
    drag: Option<DragState>,
    indent_width: f32,
    event_tx: broadcast::Sender<OutlineEvent>,
}

impl OutlineService {
    pub fn new(store: Arc<dyn StructureStore>) -> Self {
        let (event_tx, _) = broadcast::channel(OUTLINE_EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            tree: OutlineTree::default(),
            questionnaire_id: None,
            drag: None,
            indent_width: DEFAULT_INDENT_WIDTH,
            event_tx,
        }
    }

    /// Override the per-level indentation width used for depth projection.
    pub fn with_indent_width(mut self, indent_width: f32) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Subscribe to outline events
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<OutlineEvent> {
        self.event_tx.subscribe()
    }

    /// Emit an event to all subscribers. Ignores errors if no subscribers.
    fn emit_event(&self, event: OutlineEvent) {
        let _ = self.event_tx.send(event);
    }

    /// The current in-memory tree.
    pub fn tree(&self) -> &OutlineTree {
        &self.tree
    }

    /// Whether a drag gesture is currently active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Flattened visible items (no placeholders), for drag target
    /// resolution.
    pub fn items(&self) -> Vec<FlattenedItem> {
        flatten(&self.tree)
    }

    /// Render rows: flattened items with "add child" placeholders
    /// interleaved.
    pub fn rows(&self) -> Vec<OutlineRow> {
        rows_with_placeholders(&self.tree)
    }

    /// Fetch a questionnaire's structure and replace the in-memory tree.
    ///
    /// Any in-flight optimistic state (including an active drag) is
    /// discarded; the fetched structure is authoritative.
    pub async fn load(&mut self, questionnaire_id: i64) -> Result<(), OutlineError> {
        let structure = self
            .store
            .fetch_structure(questionnaire_id)
            .await
            .map_err(OutlineError::fetch_failed)?;

        self.tree = OutlineTree::from_structure(&structure);
        self.questionnaire_id = Some(questionnaire_id);
        self.drag = None;

        debug!(questionnaire_id, nodes = self.tree.len(), "Structure loaded");
        self.emit_event(OutlineEvent::StructureReplaced { questionnaire_id });
        Ok(())
    }

    /// Re-fetch the structure of the currently loaded questionnaire.
    pub async fn refresh(&mut self) -> Result<(), OutlineError> {
        match self.questionnaire_id {
            Some(questionnaire_id) => self.load(questionnaire_id).await,
            None => {
                debug!("Refresh requested before any structure was loaded");
                Ok(())
            }
        }
    }

    /// Flip a node's collapse state. Returns the new state, or `None` for
    /// unknown ids.
    pub fn toggle_collapsed(&mut self, id: &NodeId) -> Option<bool> {
        self.tree.toggle_collapsed(id)
    }

    /// Begin a drag gesture on a tree node.
    ///
    /// Placeholder rows cannot reach this: they carry no [`NodeId`].
    pub fn drag_start(&mut self, id: &NodeId) -> Result<(), OutlineError> {
        if self.drag.is_some() {
            return Err(OutlineError::DragInProgress);
        }
        if !self.tree.contains(id) {
            return Err(OutlineError::not_found(id));
        }
        debug!(active = %id, "Drag started");
        self.drag = Some(DragState {
            active_id: id.clone(),
            over_id: None,
            offset_x: 0.0,
        });
        Ok(())
    }

    /// Record the current hover target and horizontal pointer travel.
    /// Ignored when no drag is active.
    pub fn drag_over(&mut self, over_id: &NodeId, offset_x: f32) {
        match &mut self.drag {
            Some(drag) => {
                drag.over_id = Some(over_id.clone());
                drag.offset_x = offset_x;
            }
            None => debug!(over = %over_id, "Hover update without an active drag"),
        }
    }

    /// The constrained projection for the current hover position, for drop
    /// indicator rendering. `None` while idle or when the drop would be
    /// rejected.
    pub fn drop_projection(&self) -> Option<DragProjection> {
        let drag = self.drag.as_ref()?;
        let over_id = drag.over_id.as_ref()?;

        let items = flatten(&self.tree);
        let arranged = projection::arrange(&items, &drag.active_id, over_id).ok()?;
        let kind = drag.active_id.kind().ok()?;
        let raw = projection::project_arranged(&arranged, drag.offset_x, self.indent_width);
        constraints::constrain(&arranged, &raw, kind).ok()
    }

    /// Cancel the active drag gesture. The tree is untouched.
    pub fn drag_cancel(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(active = %drag.active_id, "Drag cancelled");
        }
    }

    /// Complete the active drag gesture.
    ///
    /// On a valid drop the tree is mutated optimistically and the reorder
    /// patch for the persistence boundary is returned; hand it to
    /// [`OutlineService::persist`]. Rejected or targetless drops return
    /// `None` with the tree unchanged.
    pub fn drag_end(&mut self) -> Option<Vec<ReorderEntry>> {
        let drag = self.drag.take()?;
        let Some(over_id) = drag.over_id else {
            debug!(active = %drag.active_id, "Drag ended without a hover target");
            return None;
        };

        match self.apply_drop(&drag.active_id, &over_id, drag.offset_x) {
            Ok(Some(entries)) => {
                debug!(
                    moved = %drag.active_id,
                    entries = entries.len(),
                    "Reorder applied optimistically"
                );
                self.emit_event(OutlineEvent::ReorderApplied {
                    moved: drag.active_id,
                    entries: entries.clone(),
                });
                Some(entries)
            }
            Ok(None) => {
                debug!(active = %drag.active_id, "Drop landed on the original slot");
                None
            }
            Err(err) => {
                warn!(active = %drag.active_id, error = %err, "Drop rejected");
                None
            }
        }
    }

    /// Run the full drop pipeline. `Ok(None)` means the node landed back on
    /// its own slot and nothing needs persisting.
    fn apply_drop(
        &mut self,
        active_id: &NodeId,
        over_id: &NodeId,
        offset_x: f32,
    ) -> Result<Option<Vec<ReorderEntry>>, OutlineError> {
        let items = flatten(&self.tree);
        let arranged = projection::arrange(&items, active_id, over_id)?;
        let kind = active_id.kind()?;
        let raw = projection::project_arranged(&arranged, offset_x, self.indent_width);
        let constrained = constraints::constrain(&arranged, &raw, kind)?;
        let position = insertion_position(&arranged, &constrained);

        let before = self.tree.clone();
        self.tree
            .move_node(active_id, constrained.parent_id.as_ref(), position)?;

        let same_parent = before.parent_of(active_id) == self.tree.parent_of(active_id);
        if same_parent
            && before.children_of(constrained.parent_id.as_ref())
                == self.tree.children_of(constrained.parent_id.as_ref())
        {
            return Ok(None);
        }

        let entries = diff_order(&before, &self.tree, active_id)?;
        Ok(Some(entries))
    }

    /// Persist a reorder patch in the background (fire-and-forget).
    ///
    /// The optimistic tree is never rolled back on failure; the outcome is
    /// logged and broadcast so the UI can show a non-blocking notification.
    /// The returned handle is only needed by callers that must await the
    /// write (tests do).
    pub fn persist(&self, entries: Vec<ReorderEntry>) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            match store.persist_reorder(&entries).await {
                Ok(()) => {
                    debug!(entries = entries.len(), "Reorder persisted");
                    let _ = event_tx.send(OutlineEvent::ReorderPersisted {
                        entry_count: entries.len(),
                    });
                }
                Err(err) => {
                    let err = OutlineError::persistence_failure(err);
                    warn!(error = %err, "Reorder persistence failed");
                    let _ = event_tx.send(OutlineEvent::PersistFailed {
                        message: err.to_string(),
                    });
                }
            }
        })
    }
}

/// Resolve where the dragged node lands in its new sibling list: after the
/// nearest preceding row with the projected parent and depth, or first when
/// no such sibling precedes the drop slot.
fn insertion_position(arranged: &Arranged, projection: &DragProjection) -> InsertPosition {
    let preceding = arranged.items[..arranged.over_ix]
        .iter()
        .rev()
        .find(|item| item.depth == projection.depth && item.parent_id == projection.parent_id);
    match preceding {
        Some(item) => InsertPosition::After(item.node_id.clone()),
        None => InsertPosition::First,
    }
}
