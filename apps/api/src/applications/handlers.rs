use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::applications::dto::ApplicationView;
use crate::applications::form::parse_application_form;
use crate::applications::service::{self, UpdateStatusRequest};
use crate::errors::AppError;
use crate::query::{ListQuery, PaginatedResult, QueryParameters, Scope};
use crate::state::AppState;

/// POST /api/applications
pub async fn handle_create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationView>), AppError> {
    let form = parse_application_form(multipart).await?;
    let view = service::create(
        state.store.as_ref(),
        state.files.as_ref(),
        form,
        Utc::now().date_naive(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/applications
pub async fn handle_list(
    State(state): State<AppState>,
    Query(raw): Query<ListQuery>,
) -> Result<Json<PaginatedResult<ApplicationView>>, AppError> {
    let params = QueryParameters::try_from(raw)?;
    let page = service::list(state.store.as_ref(), Scope::Active, &params).await?;
    Ok(Json(page))
}

/// GET /api/applications/trash
pub async fn handle_list_trash(
    State(state): State<AppState>,
    Query(raw): Query<ListQuery>,
) -> Result<Json<PaginatedResult<ApplicationView>>, AppError> {
    let params = QueryParameters::try_from(raw)?;
    let page = service::list(state.store.as_ref(), Scope::Trash, &params).await?;
    Ok(Json(page))
}

/// GET /api/applications/:id
pub async fn handle_get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApplicationView>, AppError> {
    let view = service::get_by_id(state.store.as_ref(), id).await?;
    Ok(Json(view))
}

/// PUT /api/applications/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApplicationView>, AppError> {
    let form = parse_application_form(multipart).await?;
    let view = service::update(
        state.store.as_ref(),
        state.files.as_ref(),
        id,
        form,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(view))
}

/// PATCH /api/applications/:id/update-status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApplicationView>, AppError> {
    let view =
        service::update_status(state.store.as_ref(), id, &req, Utc::now().date_naive()).await?;
    Ok(Json(view))
}

/// PATCH /api/applications/:id/delete
pub async fn handle_soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    service::soft_delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/applications/:id/restore
pub async fn handle_restore(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    service::restore(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/applications/:id
pub async fn handle_hard_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    service::hard_delete(state.store.as_ref(), state.files.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
