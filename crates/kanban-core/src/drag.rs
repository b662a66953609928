//! Drag-and-drop coordinator.
//!
//! Turns the start / over / end phases of a pointer gesture into board
//! commands. Task moves are committed live while hovering; column moves are
//! committed once, when the gesture ends. Nothing is rolled back on cancel.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::{BoardStore, Column, Outcome, Task};
use crate::id::{Id, IdGenerator};

/// What is being dragged, or hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    Column,
    Task,
}

/// One phase of a drag gesture, as reported by the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DragEvent {
    Start {
        kind: DragKind,
        id: Id,
    },
    Over {
        active_id: Id,
        over_id: Id,
        active_kind: DragKind,
        over_kind: DragKind,
    },
    End {
        active_id: Id,
        over_id: Option<Id>,
    },
    /// Gesture abandoned without a drop.
    Cancel,
}

impl DragEvent {
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Over { .. } => "over",
            Self::End { .. } => "end",
            Self::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        kind: DragKind,
        id: Id,
        /// Last hover target applied during this gesture.
        last_over: Option<Id>,
    },
}

/// Drag state machine: `Idle` or `Dragging`.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id and kind of the dragged item, if any.
    pub fn active(&self) -> Option<(DragKind, Id)> {
        match self.state {
            DragState::Dragging { kind, id, .. } => Some((kind, id)),
            DragState::Idle => None,
        }
    }

    /// The column being dragged, resolved against the current board.
    pub fn active_column<'a, G: IdGenerator>(&self, store: &'a BoardStore<G>) -> Option<&'a Column> {
        match self.active()? {
            (DragKind::Column, id) => store.column(id),
            (DragKind::Task, _) => None,
        }
    }

    /// The task being dragged, resolved against the current board.
    pub fn active_task<'a, G: IdGenerator>(&self, store: &'a BoardStore<G>) -> Option<&'a Task> {
        match self.active()? {
            (DragKind::Task, id) => store.task(id),
            (DragKind::Column, _) => None,
        }
    }

    /// Feed one gesture event. Returns whether the board changed.
    pub fn handle<G: IdGenerator>(&mut self, store: &mut BoardStore<G>, event: DragEvent) -> Outcome {
        trace!(phase = event.phase(), ?event, "Drag event");
        match event {
            DragEvent::Start { kind, id } => {
                self.start(store, kind, id);
                Outcome::NoOp
            }
            DragEvent::Over {
                active_id,
                over_id,
                active_kind,
                over_kind,
            } => self.over(store, active_id, over_id, active_kind, over_kind),
            DragEvent::End { active_id, over_id } => self.end(store, active_id, over_id),
            DragEvent::Cancel => {
                self.reset();
                Outcome::NoOp
            }
        }
    }

    /// Return to `Idle` if the dragged item no longer exists.
    pub fn prune<G: IdGenerator>(&mut self, store: &BoardStore<G>) {
        if let Some((kind, id)) = self.active() {
            let exists = match kind {
                DragKind::Column => store.column(id).is_some(),
                DragKind::Task => store.task(id).is_some(),
            };
            if !exists {
                debug!(%id, "Dragged item was removed, ending gesture");
                self.reset();
            }
        }
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    fn start<G: IdGenerator>(&mut self, store: &BoardStore<G>, kind: DragKind, id: Id) {
        if self.is_dragging() {
            debug!("Drag started while another was active, replacing it");
        }
        self.reset();

        let exists = match kind {
            DragKind::Column => store.column(id).is_some(),
            DragKind::Task => store.task(id).is_some(),
        };
        if !exists {
            debug!(%id, ?kind, "Drag start on unknown item ignored");
            return;
        }

        debug!(%id, ?kind, "Drag started");
        self.state = DragState::Dragging {
            kind,
            id,
            last_over: None,
        };
    }

    fn over<G: IdGenerator>(
        &mut self,
        store: &mut BoardStore<G>,
        active_id: Id,
        over_id: Id,
        active_kind: DragKind,
        over_kind: DragKind,
    ) -> Outcome {
        let DragState::Dragging { kind, id, last_over } = &mut self.state else {
            return Outcome::NoOp;
        };

        // Columns only move on drop.
        if *kind != DragKind::Task || active_kind != DragKind::Task {
            return Outcome::NoOp;
        }
        if *id != active_id || active_id == over_id {
            return Outcome::NoOp;
        }
        // Hovering keeps re-firing the same target; apply it once.
        if *last_over == Some(over_id) {
            return Outcome::NoOp;
        }
        *last_over = Some(over_id);

        match over_kind {
            DragKind::Task => move_task_onto_task(store, active_id, over_id),
            DragKind::Column => move_task_into_column(store, active_id, over_id),
        }
    }

    fn end<G: IdGenerator>(&mut self, store: &mut BoardStore<G>, active_id: Id, over_id: Option<Id>) -> Outcome {
        let previous = std::mem::take(&mut self.state);
        let DragState::Dragging { kind, id, .. } = previous else {
            return Outcome::NoOp;
        };
        debug!(%id, ?over_id, "Drag ended");

        let Some(over_id) = over_id else {
            return Outcome::NoOp;
        };
        if id != active_id || active_id == over_id {
            return Outcome::NoOp;
        }

        match kind {
            DragKind::Column => {
                let (Some(from), Some(to)) = (store.column_index(active_id), store.column_index(over_id)) else {
                    return Outcome::NoOp;
                };
                store.reorder_columns(from, to)
            }
            // Already placed while hovering.
            DragKind::Task => Outcome::NoOp,
        }
    }
}

/// Put the dragged task where the hovered task is, joining its column if needed.
fn move_task_onto_task<G: IdGenerator>(store: &mut BoardStore<G>, active_id: Id, over_id: Id) -> Outcome {
    let (Some(from), Some(to)) = (store.task_index(active_id), store.task_index(over_id)) else {
        return Outcome::NoOp;
    };
    let target_column = store.tasks()[to].column_id;

    let reassigned = if store.tasks()[from].column_id != target_column {
        store.reassign_task_column(active_id, target_column)
    } else {
        Outcome::NoOp
    };
    reassigned.or(store.reorder_tasks(from, to))
}

/// Move the dragged task into a column; its absolute position is unchanged.
fn move_task_into_column<G: IdGenerator>(store: &mut BoardStore<G>, active_id: Id, column_id: Id) -> Outcome {
    if store.column(column_id).is_none() {
        return Outcome::NoOp;
    }
    store.reassign_task_column(active_id, column_id)
}
