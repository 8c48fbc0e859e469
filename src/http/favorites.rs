use super::AppState;
use super::dto::{CheckResponse, FavoriteRequest, FavoriteResponse, ToggleResponse};
use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pokedex_library::favorite;

/// GET /favorites/
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FavoriteResponse>>, ApiError> {
    let marks = favorite::list(&state.repo).await?;
    Ok(Json(marks.iter().map(FavoriteResponse::from).collect()))
}

/// POST /favorites/
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
    let Json(request) = body?;
    let mark = favorite::add(&state.repo, request.external_id).await?;
    Ok((StatusCode::CREATED, Json(FavoriteResponse::from(&mark))))
}

/// DELETE /favorites/{id}/
pub async fn remove(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    favorite::remove(&state.repo, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /favorites/toggle/
pub async fn toggle(
    State(state): State<AppState>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let Json(request) = body?;
    let outcome = favorite::toggle(&state.repo, request.external_id).await?;
    Ok(Json(ToggleResponse::from(&outcome)))
}

/// GET /favorites/check/{external_id}/
pub async fn check(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let Path(external_id) = path?;
    let status = favorite::check(&state.repo, external_id).await?;
    Ok(Json(CheckResponse::from(&status)))
}
