//! Kanban Core Library
//!
//! In-memory board state, the drag-and-drop coordinator and the per-row
//! view state that the presentation layer renders from.

pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod id;
pub mod session;

pub use board::{BoardStore, Command, Outcome};
pub use config::Config;
pub use error::{KanbanError, KanbanResult};
pub use id::{Id, IdGenerator, RandomIds, SequentialIds};
pub use session::{Intent, Session};
