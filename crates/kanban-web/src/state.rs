//! Application state.

use kanban_core::board::Outcome;
use kanban_core::config::BoardConfig;
use kanban_core::session::BoardSnapshot;
use kanban_core::{Intent, RandomIds, Session};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Reply to every mutating request.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct IntentResponse {
    pub outcome: Outcome,
    pub board: BoardSnapshot,
}

/// Application state shared across handlers.
///
/// The board lives for as long as the server process.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(RandomIds, config))),
        }
    }

    /// Apply an intent and return the resulting board.
    pub async fn apply(&self, intent: Intent) -> IntentResponse {
        let mut session = self.session.lock().await;
        debug!(?intent, "Applying intent");
        let outcome = session.handle(intent);
        IntentResponse {
            outcome,
            board: session.snapshot(),
        }
    }

    /// Current board without changing anything.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Reply for a request that was ignored before reaching the session.
    pub async fn unchanged(&self) -> IntentResponse {
        IntentResponse {
            outcome: Outcome::NoOp,
            board: self.snapshot().await,
        }
    }
}
