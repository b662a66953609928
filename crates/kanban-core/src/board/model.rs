//! Board domain models.

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// A column on the board. Its position in `Board::columns` is its display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: Id,
    pub title: String,
}

/// A task card.
///
/// `column_id` always names a column that exists on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub column_id: Id,
    pub content: String,
}

/// All columns and tasks of one session.
///
/// Tasks live in a single flat list; filtering it by `column_id` gives the
/// top-to-bottom order inside a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn column(&self, id: Id) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: Id) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn column_index(&self, id: Id) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Absolute index of a task in the flat task list.
    pub fn task_index(&self, id: Id) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Tasks of one column, in display order.
    pub fn tasks_in(&self, column_id: Id) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.column(id).is_some() || self.task(id).is_some()
    }
}
