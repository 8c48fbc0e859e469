use super::AppState;
use super::dto::{CreatureDetail, FilterResponse, ListResponse, LoadResponse, StatsResponse};
use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pokedex_library::{catalog, ingest};
use pokedex_models::Filter;

/// GET /pokemon/
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let records = catalog::list(&state.repo).await?;
    Ok(Json(ListResponse::from(records.as_slice())))
}

/// GET /pokemon/{id}/
pub async fn detail(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
) -> Result<Json<CreatureDetail>, ApiError> {
    let Path(id) = path?;
    let record = catalog::detail(&state.repo, id).await?;
    Ok(Json(CreatureDetail::from(&record)))
}

/// POST /pokemon/load-pokemon-data/
///
/// Answers 200 however many identifiers failed; only a run that could not
/// start at all is a 500, reported in the same shape.
pub async fn load(State(state): State<AppState>) -> (StatusCode, Json<LoadResponse>) {
    match ingest::load(state.source.as_ref(), &state.repo, state.ingest.clone()).await {
        Ok(summary) => (StatusCode::OK, Json(LoadResponse::from(summary))),
        Err(err) => {
            tracing::error!(error = ?err, "Ingestion could not run");
            let message = (*err).to_string();
            let response = LoadResponse {
                message: format!("Load failed: {message}"),
                total_loaded: 0,
                errors: vec![message],
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
        },
    }
}

async fn filter(state: AppState, filter: Filter) -> Result<Json<FilterResponse>, ApiError> {
    let view = catalog::filter(&state.repo, filter).await?;
    Ok(Json(FilterResponse::from(&view)))
}

/// GET /pokemon/weight-filter/
pub async fn weight_filter(State(state): State<AppState>) -> Result<Json<FilterResponse>, ApiError> {
    filter(state, Filter::Weight).await
}

/// GET /pokemon/grass-type/
pub async fn grass_type(State(state): State<AppState>) -> Result<Json<FilterResponse>, ApiError> {
    filter(state, Filter::Grass).await
}

/// GET /pokemon/flying-tall/
pub async fn flying_tall(State(state): State<AppState>) -> Result<Json<FilterResponse>, ApiError> {
    filter(state, Filter::FlyingTall).await
}

/// GET /pokemon/stats/
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = catalog::stats(&state.repo).await?;
    Ok(Json(StatsResponse::from(stats)))
}
