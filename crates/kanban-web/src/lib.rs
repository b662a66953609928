//! Kanban Web Server
//!
//! Axum-based presentation layer: the board page plus the JSON endpoints it
//! drives. The board is held in memory for the lifetime of the process.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, patch, post},
    Router,
};
use kanban_core::config::{BoardConfig, ServerConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/board", get(routes::api::get_board))
        .route("/intents", post(routes::api::post_intent))
        // Columns
        .route("/columns", post(routes::api::create_column))
        .route(
            "/columns/{id}",
            patch(routes::api::rename_column).delete(routes::api::delete_column),
        )
        .route("/columns/{id}/tasks", post(routes::api::create_task))
        // Tasks
        .route(
            "/tasks/{id}",
            patch(routes::api::update_task).delete(routes::api::delete_task),
        )
        // Row view state
        .route(
            "/edit/{id}",
            post(routes::api::begin_edit).delete(routes::api::end_edit),
        )
        .route("/edit/{id}/key", post(routes::api::keystroke))
        .route("/hover", post(routes::api::hover))
        // Drag gestures
        .route("/drag/start", post(routes::drag::start))
        .route("/drag/over", post(routes::drag::over))
        .route("/drag/end", post(routes::drag::end))
        .route("/drag/cancel", post(routes::drag::cancel));

    Router::new()
        .route("/", get(routes::board_html::index))
        .route("/board/columns", get(routes::board_html::columns))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the process is stopped.
pub async fn run_server(server: &ServerConfig, board: BoardConfig) -> anyhow::Result<()> {
    let state = AppState::new(board);
    let app = create_router(state);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
