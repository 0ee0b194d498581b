//! JSON API over the same Thing lifecycle: list, create, read, update, delete.

use super::parse_id;
use crate::error::AppError;
use crate::model::ThingParams;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::ThingService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn body_to_params(value: Value) -> Result<ThingParams, AppError> {
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("invalid thing: {}", e))),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let things = ThingService::list(state.repo.as_ref()).await?;
    Ok(success_many(things))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let attrs = body_to_params(body)?.into_new_attrs();
    let thing = ThingService::create(state.repo.as_ref(), &attrs).await?;
    Ok(success_one(thing))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let thing = ThingService::find(state.repo.as_ref(), parse_id(&id_str)?).await?;
    Ok(success_one_ok(thing))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let repo = state.repo.as_ref();
    let params = body_to_params(body)?;
    let thing = ThingService::find(repo, parse_id(&id_str)?).await?;
    let attrs = params.apply_to(&thing);
    let thing = ThingService::update(repo, thing.id, &attrs).await?;
    Ok(success_one_ok(thing))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ThingService::destroy(state.repo.as_ref(), parse_id(&id_str)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
