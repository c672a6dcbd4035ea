//! HTTP surface of the game shelf.
//!
//! Every route answers with JSON by default. Requests carrying the
//! `HX-Request` header get server-rendered HTML fragments instead.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use render::Templates;
pub use state::AppState;

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/games", get(handlers::list_games).post(handlers::create_game))
        .route("/games/{id}", post(handlers::update_game))
        .route("/games/{id}/view", get(handlers::view_game))
        .route("/games/{id}/edit", get(handlers::edit_game))
        .route("/games/{id}/delete", post(handlers::delete_game))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
        .with_state(state)
}
