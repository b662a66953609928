//! JSON board route handlers.
//!
//! Unknown ids are not errors: the intent is a no-op and the unchanged
//! board comes back with `"outcome": "no_op"`.

use axum::{
    extract::{Path, State},
    Json,
};
use kanban_core::session::BoardSnapshot;
use kanban_core::{Id, Intent};
use serde::Deserialize;

use crate::state::{AppState, IntentResponse};

#[derive(Deserialize)]
pub struct RenameColumnRequest {
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub content: String,
}

#[derive(Deserialize)]
pub struct KeystrokeRequest {
    pub key: String,
    #[serde(default)]
    pub shift: bool,
}

#[derive(Deserialize)]
pub struct HoverRequest {
    pub id: Option<Id>,
}

/// GET /api/board
pub async fn get_board(State(state): State<AppState>) -> Json<BoardSnapshot> {
    Json(state.snapshot().await)
}

/// POST /api/intents - any intent, tagged by `type`.
pub async fn post_intent(State(state): State<AppState>, Json(intent): Json<Intent>) -> Json<IntentResponse> {
    Json(state.apply(intent).await)
}

/// POST /api/columns
pub async fn create_column(State(state): State<AppState>) -> Json<IntentResponse> {
    Json(state.apply(Intent::CreateColumn).await)
}

/// PATCH /api/columns/{id}
pub async fn rename_column(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(req): Json<RenameColumnRequest>,
) -> Json<IntentResponse> {
    Json(state.apply(Intent::RenameColumn { id, title: req.title }).await)
}

/// DELETE /api/columns/{id} - also deletes the column's tasks.
pub async fn delete_column(State(state): State<AppState>, Path(id): Path<Id>) -> Json<IntentResponse> {
    Json(state.apply(Intent::DeleteColumn { id }).await)
}

/// POST /api/columns/{id}/tasks
pub async fn create_task(State(state): State<AppState>, Path(column_id): Path<Id>) -> Json<IntentResponse> {
    Json(state.apply(Intent::CreateTask { column_id }).await)
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateTaskRequest>,
) -> Json<IntentResponse> {
    Json(state.apply(Intent::UpdateTaskContent { id, content: req.content }).await)
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<Id>) -> Json<IntentResponse> {
    Json(state.apply(Intent::DeleteTask { id }).await)
}

/// POST /api/edit/{id} - enter edit mode for a column title or task card.
pub async fn begin_edit(State(state): State<AppState>, Path(id): Path<Id>) -> Json<IntentResponse> {
    Json(state.apply(Intent::BeginEdit { id }).await)
}

/// DELETE /api/edit/{id} - leave edit mode (blur).
pub async fn end_edit(State(state): State<AppState>, Path(id): Path<Id>) -> Json<IntentResponse> {
    Json(state.apply(Intent::EndEdit { id }).await)
}

/// POST /api/edit/{id}/key
pub async fn keystroke(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(req): Json<KeystrokeRequest>,
) -> Json<IntentResponse> {
    Json(
        state
            .apply(Intent::Keystroke {
                id,
                key: req.key,
                shift: req.shift,
            })
            .await,
    )
}

/// POST /api/hover
pub async fn hover(State(state): State<AppState>, Json(req): Json<HoverRequest>) -> Json<IntentResponse> {
    Json(state.apply(Intent::Hover { id: req.id }).await)
}
