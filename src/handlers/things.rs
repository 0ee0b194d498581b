//! Browser-facing actions: index, show, new, create, edit, update, destroy.

use super::parse_id;
use crate::error::{AppError, HtmlError};
use crate::extractors::{Flash, Notice};
use crate::model::{ThingAttrs, ThingParams, ValidationErrors};
use crate::service::ThingService;
use crate::state::AppState;
use crate::views::things::{self as pages, thing_path, ThingForm};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

fn unprocessable(html: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response()
}

pub async fn index(State(state): State<AppState>, flash: Flash) -> Result<Response, HtmlError> {
    let things = ThingService::list(state.repo.as_ref()).await?;
    Ok(flash.render(pages::index(&things, flash.0)))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    flash: Flash,
) -> Result<Response, HtmlError> {
    let thing = ThingService::find(state.repo.as_ref(), parse_id(&id_str)?).await?;
    Ok(flash.render(pages::show(&thing, flash.0)))
}

pub async fn new() -> Html<String> {
    Html(pages::new(&ThingForm::default(), &ValidationErrors::default()))
}

pub async fn create(
    State(state): State<AppState>,
    Form(params): Form<ThingParams>,
) -> Result<Response, HtmlError> {
    let attrs = params.into_new_attrs();
    match ThingService::create(state.repo.as_ref(), &attrs).await {
        Ok(thing) => Ok(Flash::redirect(&thing_path(thing.id), Notice::Created)),
        Err(AppError::Validation(errors)) => Ok(unprocessable(pages::new(
            &ThingForm::new_record(&attrs),
            &errors,
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Html<String>, HtmlError> {
    let thing = ThingService::find(state.repo.as_ref(), parse_id(&id_str)?).await?;
    let form = ThingForm::existing(thing.id, &ThingAttrs::from(&thing));
    Ok(Html(pages::edit(&form, &ValidationErrors::default())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Form(params): Form<ThingParams>,
) -> Result<Response, HtmlError> {
    let repo = state.repo.as_ref();
    let thing = ThingService::find(repo, parse_id(&id_str)?).await?;
    let attrs = params.apply_to(&thing);
    match ThingService::update(repo, thing.id, &attrs).await {
        Ok(thing) => Ok(Flash::redirect(&thing_path(thing.id), Notice::Updated)),
        Err(AppError::Validation(errors)) => Ok(unprocessable(pages::edit(
            &ThingForm::existing(thing.id, &attrs),
            &errors,
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, HtmlError> {
    ThingService::destroy(state.repo.as_ref(), parse_id(&id_str)?).await?;
    Ok(Flash::redirect("/things", Notice::Destroyed))
}
