//! The seven conventional routes for the Thing resource, plus the root redirect.
//! `/things/new` is a static segment and takes precedence over `/things/:id`.

use crate::handlers::things::{create, destroy, edit, index, new, show, update};
use crate::state::AppState;
use axum::{response::Redirect, routing::get, Router};

pub fn thing_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/things") }))
        .route("/things", get(index).post(create))
        .route("/things/new", get(new))
        .route(
            "/things/:id",
            get(show).patch(update).put(update).delete(destroy),
        )
        .route("/things/:id/edit", get(edit))
        .with_state(state)
}
