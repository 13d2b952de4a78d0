use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    Form, Json,
};
use models::{Review, ReviewForm};
use serde_json::{json, Value};

use crate::errors::JsonApiError;
use crate::routes::form_or_empty;
use crate::routes::ids::{self, IdPairPath, IdPath};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/businesses/{id}/reviews", tag = "reviews",
    params(("id" = u64, Path, description = "Business id")),
    responses(
        (status = 200, description = "Reviews in insertion order"),
        (status = 404, description = "Business not found")
    )
)]
pub async fn list(State(state): State<ServerState>, path: IdPath) -> Result<Json<Vec<Review>>, JsonApiError> {
    let id = ids::required_id(path)?;
    Ok(Json(state.directory.list_reviews(id).await?))
}

#[utoipa::path(
    get, path = "/businesses/{id}/reviews/{review_id}", tag = "reviews",
    params(
        ("id" = u64, Path, description = "Business id"),
        ("review_id" = u64, Path, description = "Review id within the business")
    ),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Business or review not found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    path: IdPairPath,
) -> Result<Json<Review>, JsonApiError> {
    let (id, review_id) = ids::required_ids(path)?;
    Ok(Json(state.directory.get_review(id, review_id).await?))
}

#[utoipa::path(
    post, path = "/businesses/{id}/reviews", tag = "reviews",
    params(("id" = u64, Path, description = "Business id")),
    request_body(content = crate::openapi::ReviewFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Business not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    path: IdPath,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> Result<(StatusCode, Json<Review>), JsonApiError> {
    let id = ids::required_id(path)?;
    let review = state.directory.add_review(id, form_or_empty(form)).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    put, path = "/businesses/{id}/reviews/{review_id}", tag = "reviews",
    params(
        ("id" = u64, Path, description = "Business id"),
        ("review_id" = u64, Path, description = "Review id within the business")
    ),
    request_body(content = crate::openapi::ReviewFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Business or review not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    path: IdPairPath,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> Result<Json<Review>, JsonApiError> {
    let (id, review_id) = ids::required_ids(path)?;
    Ok(Json(state.directory.edit_review(id, review_id, form_or_empty(form)).await?))
}

#[utoipa::path(
    delete, path = "/businesses/{id}/reviews/{review_id}", tag = "reviews",
    params(
        ("id" = u64, Path, description = "Business id"),
        ("review_id" = u64, Path, description = "Review id within the business")
    ),
    responses((status = 200, description = "Deleted, or nothing to delete"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: IdPairPath,
) -> Result<Json<Value>, JsonApiError> {
    if let Some((id, review_id)) = ids::optional_ids(path)? {
        state.directory.delete_review(id, review_id).await?;
    }
    Ok(Json(json!({})))
}
