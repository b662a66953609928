//! HTML board route handlers.
//!
//! The page is rendered once; afterwards the script swaps in the
//! `/board/columns` fragment whenever an intent was applied.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use kanban_core::board::{Column, Task};
use kanban_core::session::{BoardSnapshot, ColumnView};

use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "board.html")]
struct BoardTemplate {
    columns: Vec<ColumnView>,
    active_column: Option<Column>,
    active_task: Option<Task>,
}

#[derive(Template)]
#[template(path = "partials/columns.html")]
struct ColumnsTemplate {
    columns: Vec<ColumnView>,
    active_column: Option<Column>,
    active_task: Option<Task>,
}

impl From<BoardSnapshot> for BoardTemplate {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            columns: snapshot.columns,
            active_column: snapshot.active_column,
            active_task: snapshot.active_task,
        }
    }
}

impl From<BoardSnapshot> for ColumnsTemplate {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            columns: snapshot.columns,
            active_column: snapshot.active_column,
            active_task: snapshot.active_task,
        }
    }
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the full board page.
pub async fn index(State(state): State<AppState>) -> Response {
    render(BoardTemplate::from(state.snapshot().await))
}

/// GET /board/columns - Render just the columns (for swaps after mutations).
pub async fn columns(State(state): State<AppState>) -> Response {
    render(ColumnsTemplate::from(state.snapshot().await))
}

// ============================================================
// HELPERS
// ============================================================

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}
