//! Drag gesture route handlers.
//!
//! Every field is optional on the wire. An event missing something it needs
//! is dropped; a malformed end event still closes the gesture.

use axum::{extract::State, Json};
use kanban_core::drag::{DragEvent, DragKind};
use kanban_core::{Id, Intent};
use serde::Deserialize;
use tracing::debug;

use crate::state::{AppState, IntentResponse};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DragStartRequest {
    pub kind: Option<DragKind>,
    pub id: Option<Id>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DragOverRequest {
    pub active_id: Option<Id>,
    pub over_id: Option<Id>,
    pub active_kind: Option<DragKind>,
    pub over_kind: Option<DragKind>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DragEndRequest {
    pub active_id: Option<Id>,
    pub over_id: Option<Id>,
}

impl DragStartRequest {
    pub fn into_event(self) -> Option<DragEvent> {
        Some(DragEvent::Start {
            kind: self.kind?,
            id: self.id?,
        })
    }
}

impl DragOverRequest {
    pub fn into_event(self) -> Option<DragEvent> {
        Some(DragEvent::Over {
            active_id: self.active_id?,
            over_id: self.over_id?,
            active_kind: self.active_kind?,
            over_kind: self.over_kind?,
        })
    }
}

impl DragEndRequest {
    /// Without an active id the drop cannot be matched, so it cancels.
    pub fn into_event(self) -> DragEvent {
        match self.active_id {
            Some(active_id) => DragEvent::End {
                active_id,
                over_id: self.over_id,
            },
            None => DragEvent::Cancel,
        }
    }
}

async fn apply_event(state: &AppState, event: Option<DragEvent>, phase: &str) -> IntentResponse {
    match event {
        Some(event) => state.apply(Intent::Drag { event }).await,
        None => {
            debug!(phase, "Incomplete drag event ignored");
            state.unchanged().await
        }
    }
}

/// POST /api/drag/start
pub async fn start(State(state): State<AppState>, Json(req): Json<DragStartRequest>) -> Json<IntentResponse> {
    Json(apply_event(&state, req.into_event(), "start").await)
}

/// POST /api/drag/over
pub async fn over(State(state): State<AppState>, Json(req): Json<DragOverRequest>) -> Json<IntentResponse> {
    Json(apply_event(&state, req.into_event(), "over").await)
}

/// POST /api/drag/end
pub async fn end(State(state): State<AppState>, Json(req): Json<DragEndRequest>) -> Json<IntentResponse> {
    Json(apply_event(&state, Some(req.into_event()), "end").await)
}

/// POST /api/drag/cancel
pub async fn cancel(State(state): State<AppState>) -> Json<IntentResponse> {
    Json(apply_event(&state, Some(DragEvent::Cancel), "cancel").await)
}
