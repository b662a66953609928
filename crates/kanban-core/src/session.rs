//! One board session: store, drag coordinator and per-row view state.
//!
//! The presentation layer sends [`Intent`]s and renders from [`BoardSnapshot`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::board::{BoardStore, Column, Outcome, Task};
use crate::config::BoardConfig;
use crate::drag::{DragCoordinator, DragEvent, DragKind};
use crate::id::{Id, IdGenerator, RandomIds};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    CreateColumn,
    DeleteColumn { id: Id },
    RenameColumn { id: Id, title: String },
    CreateTask { column_id: Id },
    DeleteTask { id: Id },
    UpdateTaskContent { id: Id, content: String },
    /// Click on a column title or a task card.
    BeginEdit { id: Id },
    /// Focus left the editor.
    EndEdit { id: Id },
    /// Key pressed inside an editor.
    Keystroke {
        id: Id,
        key: String,
        #[serde(default)]
        shift: bool,
    },
    /// Pointer entered a task card (`Some`) or left it (`None`).
    Hover { id: Option<Id> },
    Drag { event: DragEvent },
}

/// Render model of a task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub editing: bool,
    pub hovered: bool,
    /// Drawn as a placeholder while its overlay follows the pointer.
    pub dragging: bool,
}

impl TaskView {
    /// The delete button is only offered on a hovered card that is not being edited.
    pub fn shows_delete(&self) -> bool {
        self.hovered && !self.editing
    }
}

/// Render model of a column with its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnView {
    #[serde(flatten)]
    pub column: Column,
    pub editing: bool,
    pub dragging: bool,
    pub tasks: Vec<TaskView>,
}

/// Read-only copy of everything the presentation layer draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnView>,
    pub active_column: Option<Column>,
    pub active_task: Option<Task>,
}

impl BoardSnapshot {
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

/// The single board of a browser session.
#[derive(Debug)]
pub struct Session<G = RandomIds> {
    store: BoardStore<G>,
    drag: DragCoordinator,
    editing: HashSet<Id>,
    hovered: Option<Id>,
}

impl Default for Session<RandomIds> {
    fn default() -> Self {
        Self::new(RandomIds, BoardConfig::default())
    }
}

impl<G: IdGenerator> Session<G> {
    pub fn new(ids: G, config: BoardConfig) -> Self {
        Self {
            store: BoardStore::new(ids, config),
            drag: DragCoordinator::new(),
            editing: HashSet::new(),
            hovered: None,
        }
    }

    pub fn store(&self) -> &BoardStore<G> {
        &self.store
    }

    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    pub fn is_editing(&self, id: Id) -> bool {
        self.editing.contains(&id)
    }

    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    /// Apply one intent. `Applied` means the board or the view state changed.
    pub fn handle(&mut self, intent: Intent) -> Outcome {
        let outcome = match intent {
            Intent::CreateColumn => {
                self.store.create_column();
                Outcome::Applied
            }
            Intent::DeleteColumn { id } => self.store.delete_column(id),
            Intent::RenameColumn { id, title } => self.store.rename_column(id, title),
            Intent::CreateTask { column_id } => {
                if self.store.column(column_id).is_none() {
                    debug!(%column_id, "Task creation for unknown column ignored");
                    Outcome::NoOp
                } else {
                    self.store.create_task(column_id);
                    Outcome::Applied
                }
            }
            Intent::DeleteTask { id } => self.store.delete_task(id),
            Intent::UpdateTaskContent { id, content } => self.store.update_task_content(id, content),
            Intent::BeginEdit { id } => self.begin_edit(id),
            Intent::EndEdit { id } => self.end_edit(id),
            Intent::Keystroke { id, key, shift } => self.keystroke(id, &key, shift),
            Intent::Hover { id } => self.hover(id),
            Intent::Drag { event } => self.drag_event(event),
        };
        if outcome.is_applied() {
            self.prune();
        }
        outcome
    }

    /// Build the render model.
    pub fn snapshot(&self) -> BoardSnapshot {
        let active = self.drag.active().map(|(_, id)| id);
        let columns = self
            .store
            .columns()
            .iter()
            .map(|column| ColumnView {
                column: column.clone(),
                editing: self.is_editing(column.id),
                dragging: active == Some(column.id),
                tasks: self
                    .store
                    .tasks_in(column.id)
                    .into_iter()
                    .map(|task| TaskView {
                        task: task.clone(),
                        editing: self.is_editing(task.id),
                        hovered: self.hovered == Some(task.id),
                        dragging: active == Some(task.id),
                    })
                    .collect(),
            })
            .collect();

        BoardSnapshot {
            columns,
            active_column: self.drag.active_column(&self.store).cloned(),
            active_task: self.drag.active_task(&self.store).cloned(),
        }
    }

    fn begin_edit(&mut self, id: Id) -> Outcome {
        if !self.store.board().contains(id) || self.editing.contains(&id) {
            return Outcome::NoOp;
        }
        if self.drag.active().map(|(_, active)| active) == Some(id) {
            return Outcome::NoOp;
        }
        self.editing.insert(id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Outcome::Applied
    }

    fn end_edit(&mut self, id: Id) -> Outcome {
        if self.editing.remove(&id) {
            Outcome::Applied
        } else {
            Outcome::NoOp
        }
    }

    // Column titles commit on Enter, task cards on Shift+Enter.
    fn keystroke(&mut self, id: Id, key: &str, shift: bool) -> Outcome {
        if !self.editing.contains(&id) || key != "Enter" {
            return Outcome::NoOp;
        }
        let commits = if self.store.column(id).is_some() {
            true
        } else {
            shift
        };
        if commits {
            self.end_edit(id)
        } else {
            Outcome::NoOp
        }
    }

    fn hover(&mut self, id: Option<Id>) -> Outcome {
        let next = id.filter(|id| self.store.task(*id).is_some() && !self.editing.contains(id));
        if next == self.hovered {
            return Outcome::NoOp;
        }
        self.hovered = next;
        Outcome::Applied
    }

    fn drag_event(&mut self, event: DragEvent) -> Outcome {
        if let DragEvent::Start { id, .. } = &event {
            if self.editing.contains(id) {
                debug!(%id, "Drag refused while item is being edited");
                return Outcome::NoOp;
            }
        }
        let was_dragging = self.drag.active();
        let outcome = self.drag.handle(&mut self.store, event);
        // Entering or leaving a gesture changes the overlay.
        if was_dragging != self.drag.active() {
            Outcome::Applied.or(outcome)
        } else {
            outcome
        }
    }

    /// Forget view state that points at items which no longer exist.
    fn prune(&mut self) {
        let board = self.store.board();
        self.editing.retain(|id| board.contains(*id));
        if self.hovered.is_some_and(|id| board.task(id).is_none()) {
            self.hovered = None;
        }
        self.drag.prune(&self.store);
    }
}

/// Which kind of item an id names, if any.
pub fn kind_of<G: IdGenerator>(store: &BoardStore<G>, id: Id) -> Option<DragKind> {
    if store.column(id).is_some() {
        Some(DragKind::Column)
    } else if store.task(id).is_some() {
        Some(DragKind::Task)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;

    fn session() -> Session<SequentialIds> {
        Session::new(SequentialIds::new(), BoardConfig::default())
    }

    fn last_column(s: &Session<SequentialIds>) -> Id {
        s.store().columns().last().unwrap().id
    }

    fn last_task(s: &Session<SequentialIds>) -> Id {
        s.store().tasks().last().unwrap().id
    }

    #[test]
    fn test_create_column_twice() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        s.handle(Intent::CreateColumn);
        let snap = s.snapshot();
        let titles: Vec<&str> = snap.columns.iter().map(|c| c.column.title.as_str()).collect();
        assert_eq!(titles, vec!["Column 1", "Column 2"]);
        assert_ne!(snap.columns[0].column.id, snap.columns[1].column.id);
    }

    #[test]
    fn test_create_task_for_unknown_column_is_noop() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let col = last_column(&s);
        s.handle(Intent::DeleteColumn { id: col });
        assert_eq!(s.handle(Intent::CreateTask { column_id: col }), Outcome::NoOp);
        assert!(s.store().tasks().is_empty());
    }

    #[test]
    fn test_snapshot_groups_tasks_by_column() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateColumn);
        let b = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        s.handle(Intent::CreateTask { column_id: b });
        s.handle(Intent::CreateTask { column_id: a });

        let snap = s.snapshot();
        let a_tasks: Vec<&str> = snap.columns[0].tasks.iter().map(|t| t.task.content.as_str()).collect();
        let b_tasks: Vec<&str> = snap.columns[1].tasks.iter().map(|t| t.task.content.as_str()).collect();
        assert_eq!(a_tasks, vec!["Task 1", "Task 3"]);
        assert_eq!(b_tasks, vec!["Task 2"]);
        assert_eq!(snap.task_count(), 3);
    }

    #[test]
    fn test_column_edit_ends_on_enter() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);

        assert_eq!(s.handle(Intent::BeginEdit { id: a }), Outcome::Applied);
        s.handle(Intent::RenameColumn { id: a, title: "Todo".into() });
        assert!(s.snapshot().columns[0].editing);

        let key = |k: &str| Intent::Keystroke { id: a, key: k.into(), shift: false };
        assert_eq!(s.handle(key("x")), Outcome::NoOp);
        assert_eq!(s.handle(key("Enter")), Outcome::Applied);
        assert!(!s.is_editing(a));
        assert_eq!(s.snapshot().columns[0].column.title, "Todo");
    }

    #[test]
    fn test_task_edit_needs_shift_enter() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        let t = last_task(&s);

        s.handle(Intent::BeginEdit { id: t });
        let plain = Intent::Keystroke { id: t, key: "Enter".into(), shift: false };
        assert_eq!(s.handle(plain), Outcome::NoOp);
        assert!(s.is_editing(t));

        let shifted = Intent::Keystroke { id: t, key: "Enter".into(), shift: true };
        assert_eq!(s.handle(shifted), Outcome::Applied);
        assert!(!s.is_editing(t));
    }

    #[test]
    fn test_blur_ends_edit() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::BeginEdit { id: a });
        assert_eq!(s.handle(Intent::EndEdit { id: a }), Outcome::Applied);
        assert_eq!(s.handle(Intent::EndEdit { id: a }), Outcome::NoOp);
    }

    #[test]
    fn test_editing_item_cannot_be_dragged() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::BeginEdit { id: a });

        let start = Intent::Drag {
            event: DragEvent::Start { kind: DragKind::Column, id: a },
        };
        assert_eq!(s.handle(start.clone()), Outcome::NoOp);
        assert!(!s.drag().is_dragging());

        s.handle(Intent::EndEdit { id: a });
        assert_eq!(s.handle(start), Outcome::Applied);
        assert_eq!(s.snapshot().active_column.map(|c| c.id), Some(a));
        assert!(s.snapshot().columns[0].dragging);
    }

    #[test]
    fn test_hover_shows_delete_until_edit() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        let t = last_task(&s);

        s.handle(Intent::Hover { id: Some(t) });
        assert!(s.snapshot().columns[0].tasks[0].shows_delete());

        s.handle(Intent::BeginEdit { id: t });
        let snap = s.snapshot();
        let view = &snap.columns[0].tasks[0];
        assert!(view.editing);
        assert!(!view.hovered);
        assert!(!view.shows_delete());

        assert_eq!(s.handle(Intent::Hover { id: Some(t) }), Outcome::NoOp);
    }

    #[test]
    fn test_hover_on_column_is_ignored() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        assert_eq!(s.handle(Intent::Hover { id: Some(a) }), Outcome::NoOp);
        assert_eq!(s.hovered(), None);
    }

    #[test]
    fn test_delete_prunes_view_state() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        let t = last_task(&s);
        s.handle(Intent::Hover { id: Some(t) });
        s.handle(Intent::BeginEdit { id: a });

        s.handle(Intent::DeleteColumn { id: a });

        assert!(!s.is_editing(a));
        assert_eq!(s.hovered(), None);
        assert!(s.snapshot().columns.is_empty());
    }

    #[test]
    fn test_delete_during_drag_returns_to_idle() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        let t = last_task(&s);

        s.handle(Intent::Drag {
            event: DragEvent::Start { kind: DragKind::Task, id: t },
        });
        assert_eq!(s.snapshot().active_task.map(|t| t.id), Some(t));

        s.handle(Intent::DeleteTask { id: t });
        assert!(!s.drag().is_dragging());
        assert_eq!(s.snapshot().active_task, None);
    }

    #[test]
    fn test_drag_across_columns_through_session() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateColumn);
        let b = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        let t1 = last_task(&s);
        s.handle(Intent::CreateTask { column_id: b });
        let t2 = last_task(&s);

        s.handle(Intent::Drag { event: DragEvent::Start { kind: DragKind::Task, id: t1 } });
        s.handle(Intent::Drag {
            event: DragEvent::Over {
                active_id: t1,
                over_id: t2,
                active_kind: DragKind::Task,
                over_kind: DragKind::Task,
            },
        });
        s.handle(Intent::Drag { event: DragEvent::End { active_id: t1, over_id: Some(t2) } });

        let snap = s.snapshot();
        assert!(snap.columns[0].tasks.is_empty());
        let b_ids: Vec<Id> = snap.columns[1].tasks.iter().map(|t| t.task.id).collect();
        assert_eq!(b_ids, vec![t2, t1]);
        assert_eq!(snap.active_task, None);
    }

    #[test]
    fn test_kind_of() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let a = last_column(&s);
        s.handle(Intent::CreateTask { column_id: a });
        let t = last_task(&s);
        assert_eq!(kind_of(s.store(), a), Some(DragKind::Column));
        assert_eq!(kind_of(s.store(), t), Some(DragKind::Task));
        s.handle(Intent::DeleteTask { id: t });
        assert_eq!(kind_of(s.store(), t), None);
    }

    #[test]
    fn test_intent_json_shape() {
        let intent: Intent = serde_json::from_str(r#"{"type":"create_column"}"#).unwrap();
        assert_eq!(intent, Intent::CreateColumn);

        let id = SequentialIds::new().next_id();
        let json = serde_json::json!({"type": "keystroke", "id": id.to_string(), "key": "Enter"});
        let intent: Intent = serde_json::from_value(json).unwrap();
        assert_eq!(intent, Intent::Keystroke { id, key: "Enter".into(), shift: false });
    }

    #[test]
    fn test_snapshot_json_is_flat() {
        let mut s = session();
        s.handle(Intent::CreateColumn);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["columns"][0]["title"], "Column 1");
        assert_eq!(json["columns"][0]["editing"], false);
        assert!(json["active_column"].is_null());
    }
}
