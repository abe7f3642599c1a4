//! API request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use seller_core::{Id, Identifiable};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, ValidJson};
use crate::resource::Resource;

/// POST /v1/{resource}
#[instrument(skip_all, fields(resource = R::PATH))]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    ValidJson(mut value): ValidJson<R>,
) -> ApiResult<(StatusCode, Json<R>)> {
    let ctx = state.request_context();
    R::create(state.use_cases.as_ref(), &ctx, &mut value).await?;
    Ok((StatusCode::CREATED, Json(value)))
}

/// GET /v1/{resource}/:id
#[instrument(skip_all, fields(resource = R::PATH, id = %id))]
pub async fn show<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<Json<R>> {
    let ctx = state.request_context();
    let value = R::get(state.use_cases.as_ref(), &ctx, &id).await?;
    Ok(Json(value))
}

/// PUT /v1/{resource}
///
/// Full overwrite; the id travels in the body.
#[instrument(skip_all, fields(resource = R::PATH))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    ValidJson(mut value): ValidJson<R>,
) -> ApiResult<Json<R>> {
    if value.is_new_record() {
        return Err(ApiError::bad_request(format!("{} id is required", R::TYPE_NAME)));
    }
    let ctx = state.request_context();
    R::update(state.use_cases.as_ref(), &ctx, &mut value).await?;
    Ok(Json(value))
}

/// DELETE /v1/{resource}/:id
#[instrument(skip_all, fields(resource = R::PATH, id = %id))]
pub async fn destroy<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    let ctx = state.request_context();
    R::delete(state.use_cases.as_ref(), &ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /healthz
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
