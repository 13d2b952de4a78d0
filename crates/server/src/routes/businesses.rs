use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    Form, Json,
};
use models::{Business, BusinessForm};
use serde_json::{json, Value};

use crate::errors::JsonApiError;
use crate::routes::form_or_empty;
use crate::routes::ids::{self, IdPath};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/businesses", tag = "businesses",
    responses((status = 200, description = "Every business, reviews included"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Business>>, JsonApiError> {
    Ok(Json(state.directory.list_businesses().await?))
}

#[utoipa::path(
    get, path = "/businesses/{id}", tag = "businesses",
    params(("id" = u64, Path, description = "Business id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, path: IdPath) -> Result<Json<Business>, JsonApiError> {
    let id = ids::required_id(path)?;
    Ok(Json(state.directory.get_business(id).await?))
}

#[utoipa::path(
    post, path = "/businesses", tag = "businesses",
    request_body(content = crate::openapi::BusinessFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing or malformed field")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    form: Result<Form<BusinessForm>, FormRejection>,
) -> Result<(StatusCode, Json<Business>), JsonApiError> {
    let created = state.directory.create_business(form_or_empty(form)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/businesses/{id}", tag = "businesses",
    params(("id" = u64, Path, description = "Business id")),
    request_body(content = crate::openapi::BusinessFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    path: IdPath,
    form: Result<Form<BusinessForm>, FormRejection>,
) -> Result<Json<Business>, JsonApiError> {
    let id = ids::required_id(path)?;
    Ok(Json(state.directory.update_business(id, form_or_empty(form)).await?))
}

#[utoipa::path(
    delete, path = "/businesses/{id}", tag = "businesses",
    params(("id" = u64, Path, description = "Business id")),
    responses((status = 200, description = "Deleted, or nothing to delete"))
)]
pub async fn delete(State(state): State<ServerState>, path: IdPath) -> Result<Json<Value>, JsonApiError> {
    if let Some(id) = ids::optional_id(path)? {
        state.directory.delete_business(id).await?;
    }
    Ok(Json(json!({})))
}
