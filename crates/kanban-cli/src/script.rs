//! Labelled session scripts.
//!
//! A script is a TOML list of `[[step]]` tables. Steps that create items may
//! give them a `label`; later steps refer to items by that label.
//!
//! ```toml
//! [[step]]
//! action = "create_column"
//! label = "todo"
//!
//! [[step]]
//! action = "create_task"
//! column = "todo"
//! label = "docs"
//! ```

use kanban_core::config::BoardConfig;
use kanban_core::drag::DragEvent;
use kanban_core::session::kind_of;
use kanban_core::{Id, Intent, KanbanError, KanbanResult, Outcome, SequentialIds, Session};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    CreateColumn { label: Option<String> },
    DeleteColumn { column: String },
    RenameColumn { column: String, title: String },
    CreateTask { column: String, label: Option<String> },
    DeleteTask { task: String },
    UpdateTask { task: String, content: String },
    DragStart { item: String },
    DragOver { item: String, over: String },
    DragEnd { item: String, over: Option<String> },
    DragCancel,
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Self::CreateColumn { label } => format!("create column{}", label_suffix(label)),
            Self::DeleteColumn { column } => format!("delete column {column}"),
            Self::RenameColumn { column, title } => format!("rename column {column} to {title:?}"),
            Self::CreateTask { column, label } => format!("create task in {column}{}", label_suffix(label)),
            Self::DeleteTask { task } => format!("delete task {task}"),
            Self::UpdateTask { task, content } => format!("update task {task} to {content:?}"),
            Self::DragStart { item } => format!("drag {item}"),
            Self::DragOver { item, over } => format!("drag {item} over {over}"),
            Self::DragEnd { item, over: Some(over) } => format!("drop {item} on {over}"),
            Self::DragEnd { item, over: None } => format!("drop {item} outside"),
            Self::DragCancel => "cancel drag".to_string(),
        }
    }
}

fn label_suffix(label: &Option<String>) -> String {
    label.as_ref().map(|l| format!(" as {l}")).unwrap_or_default()
}

impl Script {
    pub fn from_toml(text: &str) -> KanbanResult<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Result of one replayed step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub description: String,
    pub outcome: Outcome,
}

/// Replays a script against a fresh session with reproducible ids.
pub struct Replay {
    session: Session<SequentialIds>,
    labels: HashMap<String, Id>,
}

impl Replay {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            session: Session::new(SequentialIds::new(), config),
            labels: HashMap::new(),
        }
    }

    pub fn session(&self) -> &Session<SequentialIds> {
        &self.session
    }

    /// Run every step in order. Stops at the first unknown label.
    pub fn run(&mut self, script: &Script) -> KanbanResult<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.iter().enumerate() {
            let outcome = self.step(index + 1, step)?;
            debug!(step = index + 1, ?outcome, "Replayed step");
            reports.push(StepReport {
                description: step.describe(),
                outcome,
            });
        }
        Ok(reports)
    }

    fn step(&mut self, number: usize, step: &Step) -> KanbanResult<Outcome> {
        let outcome = match step {
            Step::CreateColumn { label } => {
                let outcome = self.session.handle(Intent::CreateColumn);
                if let (Some(label), Some(column)) = (label, self.session.store().columns().last()) {
                    self.labels.insert(label.clone(), column.id);
                }
                outcome
            }
            Step::DeleteColumn { column } => {
                let id = self.resolve(number, column)?;
                self.session.handle(Intent::DeleteColumn { id })
            }
            Step::RenameColumn { column, title } => {
                let id = self.resolve(number, column)?;
                self.session.handle(Intent::RenameColumn {
                    id,
                    title: title.clone(),
                })
            }
            Step::CreateTask { column, label } => {
                let column_id = self.resolve(number, column)?;
                let outcome = self.session.handle(Intent::CreateTask { column_id });
                if let (Some(label), true) = (label, outcome.is_applied()) {
                    if let Some(task) = self.session.store().tasks().last() {
                        self.labels.insert(label.clone(), task.id);
                    }
                }
                outcome
            }
            Step::DeleteTask { task } => {
                let id = self.resolve(number, task)?;
                self.session.handle(Intent::DeleteTask { id })
            }
            Step::UpdateTask { task, content } => {
                let id = self.resolve(number, task)?;
                self.session.handle(Intent::UpdateTaskContent {
                    id,
                    content: content.clone(),
                })
            }
            Step::DragStart { item } => {
                let id = self.resolve(number, item)?;
                match kind_of(self.session.store(), id) {
                    Some(kind) => self.drag(DragEvent::Start { kind, id }),
                    None => Outcome::NoOp,
                }
            }
            Step::DragOver { item, over } => {
                let active_id = self.resolve(number, item)?;
                let over_id = self.resolve(number, over)?;
                let store = self.session.store();
                match (kind_of(store, active_id), kind_of(store, over_id)) {
                    (Some(active_kind), Some(over_kind)) => self.drag(DragEvent::Over {
                        active_id,
                        over_id,
                        active_kind,
                        over_kind,
                    }),
                    _ => Outcome::NoOp,
                }
            }
            Step::DragEnd { item, over } => {
                let active_id = self.resolve(number, item)?;
                let over_id = over.as_deref().map(|o| self.resolve(number, o)).transpose()?;
                self.drag(DragEvent::End { active_id, over_id })
            }
            Step::DragCancel => self.drag(DragEvent::Cancel),
        };
        Ok(outcome)
    }

    fn drag(&mut self, event: DragEvent) -> Outcome {
        self.session.handle(Intent::Drag { event })
    }

    fn resolve(&self, number: usize, label: &str) -> KanbanResult<Id> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| KanbanError::script(number, format!("unknown label '{label}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROSS_COLUMN: &str = r#"
[[step]]
action = "create_column"
label = "a"

[[step]]
action = "create_column"
label = "b"

[[step]]
action = "create_task"
column = "a"
label = "t1"

[[step]]
action = "create_task"
column = "b"
label = "t2"

[[step]]
action = "drag_start"
item = "t1"

[[step]]
action = "drag_over"
item = "t1"
over = "t2"

[[step]]
action = "drag_over"
item = "t1"
over = "t2"

[[step]]
action = "drag_end"
item = "t1"
over = "t2"
"#;

    fn replay(text: &str) -> (Replay, Vec<StepReport>) {
        let script = Script::from_toml(text).unwrap();
        let mut replay = Replay::new(BoardConfig::default());
        let reports = replay.run(&script).unwrap();
        (replay, reports)
    }

    #[test]
    fn test_cross_column_script() {
        let (replay, reports) = replay(CROSS_COLUMN);
        let outcomes: Vec<Outcome> = reports.iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes[5], Outcome::Applied);
        assert_eq!(outcomes[6], Outcome::NoOp);

        let snap = replay.session().snapshot();
        assert!(snap.columns[0].tasks.is_empty());
        let contents: Vec<&str> = snap.columns[1].tasks.iter().map(|t| t.task.content.as_str()).collect();
        assert_eq!(contents, vec!["Task 2", "Task 1"]);
    }

    #[test]
    fn test_column_drop_script() {
        let text = r#"
[[step]]
action = "create_column"
label = "a"

[[step]]
action = "create_column"
label = "b"

[[step]]
action = "rename_column"
column = "b"
title = "Done"

[[step]]
action = "drag_start"
item = "b"

[[step]]
action = "drag_end"
item = "b"
over = "a"
"#;
        let (replay, reports) = replay(text);
        assert_eq!(reports[4].description, "drop b on a");
        let titles: Vec<String> = replay
            .session()
            .snapshot()
            .columns
            .into_iter()
            .map(|c| c.column.title)
            .collect();
        assert_eq!(titles, vec!["Done", "Column 1"]);
    }

    #[test]
    fn test_unknown_label_reports_step() {
        let text = r#"
[[step]]
action = "create_column"

[[step]]
action = "delete_column"
column = "missing"
"#;
        let script = Script::from_toml(text).unwrap();
        let err = Replay::new(BoardConfig::default()).run(&script).unwrap_err();
        match err {
            KanbanError::Script { step, message } => {
                assert_eq!(step, 2);
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deleted_label_is_noop() {
        let text = r#"
[[step]]
action = "create_column"
label = "a"

[[step]]
action = "create_task"
column = "a"
label = "t"

[[step]]
action = "delete_column"
column = "a"

[[step]]
action = "update_task"
task = "t"
content = "still here?"
"#;
        let (replay, reports) = replay(text);
        assert_eq!(reports[3].outcome, Outcome::NoOp);
        assert!(replay.session().store().tasks().is_empty());
    }

    #[test]
    fn test_empty_script() {
        let (replay, reports) = replay("");
        assert!(reports.is_empty());
        assert!(replay.session().snapshot().columns.is_empty());
    }

    #[test]
    fn test_unknown_action_is_parse_error() {
        let err = Script::from_toml("[[step]]\naction = \"explode\"\n").unwrap_err();
        assert!(matches!(err, KanbanError::Toml(_)));
    }
}
