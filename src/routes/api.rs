//! JSON API routes, mounted under `/api/v1`.

use crate::handlers::api::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/things", get(list).post(create))
        .route(
            "/things/:id",
            get(read).patch(update).put(update).delete(delete_handler),
        )
        .with_state(state)
}
