//! Board state store.
//!
//! Every mutation goes through [`reduce`], which builds the next board from
//! the current one. A command either applies completely or is a no-op; there
//! is no error path.

pub mod model;

pub use model::{Board, Column, Task};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BoardConfig;
use crate::id::{Id, IdGenerator, RandomIds};

/// A mutation of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    CreateColumn,
    DeleteColumn { id: Id },
    RenameColumn { id: Id, title: String },
    /// The column is not checked; callers pass an id they got from the board.
    CreateTask { column_id: Id },
    DeleteTask { id: Id },
    UpdateTaskContent { id: Id, content: String },
    ReorderColumns { from: usize, to: usize },
    /// Indices are absolute positions in the flat task list.
    ReorderTasks { from: usize, to: usize },
    ReassignTaskColumn { id: Id, column_id: Id },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateColumn => "create_column",
            Self::DeleteColumn { .. } => "delete_column",
            Self::RenameColumn { .. } => "rename_column",
            Self::CreateTask { .. } => "create_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::UpdateTaskContent { .. } => "update_task_content",
            Self::ReorderColumns { .. } => "reorder_columns",
            Self::ReorderTasks { .. } => "reorder_tasks",
            Self::ReassignTaskColumn { .. } => "reassign_task_column",
        }
    }
}

/// Whether a command changed the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    NoOp,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// `Applied` if either side applied.
    pub fn or(self, other: Outcome) -> Outcome {
        if self.is_applied() || other.is_applied() {
            Self::Applied
        } else {
            Self::NoOp
        }
    }
}

/// Move the element at `from` to `to`, shifting the ones in between.
///
/// Returns `None` when the indices are equal or out of range.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from == to || from >= items.len() || to >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    let item = next.remove(from);
    next.insert(to, item);
    Some(next)
}

/// Compute the board that results from applying `command` to `board`.
///
/// `None` means the command is a no-op: its target was not found, its
/// indices are degenerate, or it would not change anything.
pub fn reduce<G: IdGenerator + ?Sized>(
    board: &Board,
    command: &Command,
    ids: &mut G,
    config: &BoardConfig,
) -> Option<Board> {
    match command {
        Command::CreateColumn => {
            let mut next = board.clone();
            next.columns.push(Column {
                id: ids.next_id(),
                title: config.column_title(board.columns.len() + 1),
            });
            Some(next)
        }

        Command::DeleteColumn { id } => {
            board.column(*id)?;
            Some(Board {
                columns: board.columns.iter().filter(|c| c.id != *id).cloned().collect(),
                tasks: board.tasks.iter().filter(|t| t.column_id != *id).cloned().collect(),
            })
        }

        Command::RenameColumn { id, title } => {
            let index = board.column_index(*id)?;
            if board.columns[index].title == *title {
                return None;
            }
            let mut next = board.clone();
            next.columns[index].title = title.clone();
            Some(next)
        }

        Command::CreateTask { column_id } => {
            let mut next = board.clone();
            next.tasks.push(Task {
                id: ids.next_id(),
                column_id: *column_id,
                content: config.task_content(board.tasks.len() + 1),
            });
            Some(next)
        }

        Command::DeleteTask { id } => {
            let index = board.task_index(*id)?;
            let mut next = board.clone();
            next.tasks.remove(index);
            Some(next)
        }

        Command::UpdateTaskContent { id, content } => {
            let index = board.task_index(*id)?;
            if board.tasks[index].content == *content {
                return None;
            }
            let mut next = board.clone();
            next.tasks[index].content = content.clone();
            Some(next)
        }

        Command::ReorderColumns { from, to } => Some(Board {
            columns: move_item(&board.columns, *from, *to)?,
            tasks: board.tasks.clone(),
        }),

        Command::ReorderTasks { from, to } => Some(Board {
            columns: board.columns.clone(),
            tasks: move_item(&board.tasks, *from, *to)?,
        }),

        Command::ReassignTaskColumn { id, column_id } => {
            let index = board.task_index(*id)?;
            if board.tasks[index].column_id == *column_id {
                return None;
            }
            let mut next = board.clone();
            next.tasks[index].column_id = *column_id;
            Some(next)
        }
    }
}

/// Holds the current board and replaces it as commands are applied.
#[derive(Debug, Clone)]
pub struct BoardStore<G = RandomIds> {
    board: Board,
    ids: G,
    config: BoardConfig,
}

impl Default for BoardStore<RandomIds> {
    fn default() -> Self {
        Self::new(RandomIds, BoardConfig::default())
    }
}

impl<G: IdGenerator> BoardStore<G> {
    /// Create an empty store.
    pub fn new(ids: G, config: BoardConfig) -> Self {
        Self {
            board: Board::default(),
            ids,
            config,
        }
    }

    /// Current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.board.tasks
    }

    pub fn tasks_in(&self, column_id: Id) -> Vec<&Task> {
        self.board.tasks_in(column_id).collect()
    }

    pub fn column(&self, id: Id) -> Option<&Column> {
        self.board.column(id)
    }

    pub fn task(&self, id: Id) -> Option<&Task> {
        self.board.task(id)
    }

    pub fn column_index(&self, id: Id) -> Option<usize> {
        self.board.column_index(id)
    }

    pub fn task_index(&self, id: Id) -> Option<usize> {
        self.board.task_index(id)
    }

    /// Apply a command, replacing the held board only if it changed.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        match reduce(&self.board, &command, &mut self.ids, &self.config) {
            Some(next) => {
                self.board = next;
                debug!(command = command.name(), "Board command applied");
                Outcome::Applied
            }
            None => {
                debug!(command = command.name(), ?command, "Board command ignored");
                Outcome::NoOp
            }
        }
    }

    /// Append a new column and return its id.
    pub fn create_column(&mut self) -> Id {
        self.dispatch(Command::CreateColumn);
        self.last_column_id()
    }

    pub fn delete_column(&mut self, id: Id) -> Outcome {
        self.dispatch(Command::DeleteColumn { id })
    }

    pub fn rename_column(&mut self, id: Id, title: impl Into<String>) -> Outcome {
        self.dispatch(Command::RenameColumn {
            id,
            title: title.into(),
        })
    }

    /// Append a new task to `column_id` and return its id.
    pub fn create_task(&mut self, column_id: Id) -> Id {
        self.dispatch(Command::CreateTask { column_id });
        self.last_task_id()
    }

    pub fn delete_task(&mut self, id: Id) -> Outcome {
        self.dispatch(Command::DeleteTask { id })
    }

    pub fn update_task_content(&mut self, id: Id, content: impl Into<String>) -> Outcome {
        self.dispatch(Command::UpdateTaskContent {
            id,
            content: content.into(),
        })
    }

    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Outcome {
        self.dispatch(Command::ReorderColumns { from, to })
    }

    pub fn reorder_tasks(&mut self, from: usize, to: usize) -> Outcome {
        self.dispatch(Command::ReorderTasks { from, to })
    }

    pub fn reassign_task_column(&mut self, id: Id, column_id: Id) -> Outcome {
        self.dispatch(Command::ReassignTaskColumn { id, column_id })
    }

    // Create commands always apply, so the new item is last.
    fn last_column_id(&self) -> Id {
        self.board.columns[self.board.columns.len() - 1].id
    }

    fn last_task_id(&self) -> Id {
        self.board.tasks[self.board.tasks.len() - 1].id
    }
}
