mod creatures;
mod dto;
mod error;
mod favorites;

use axum::Router;
use axum::routing::{delete, get, post};
use pokedex_remote::SourceHandle;
use pokedex_store::Repository;
use std::ops::RangeInclusive;

/// Everything a request handler needs, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub source: SourceHandle,
    /// External identifiers fetched by `POST /pokemon/load-pokemon-data/`.
    pub ingest: RangeInclusive<u32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pokemon/", get(creatures::list))
        .route("/pokemon/load-pokemon-data/", post(creatures::load))
        .route("/pokemon/weight-filter/", get(creatures::weight_filter))
        .route("/pokemon/grass-type/", get(creatures::grass_type))
        .route("/pokemon/flying-tall/", get(creatures::flying_tall))
        .route("/pokemon/stats/", get(creatures::stats))
        .route("/pokemon/{id}/", get(creatures::detail))
        .route("/favorites/", get(favorites::list).post(favorites::create))
        .route("/favorites/toggle/", post(favorites::toggle))
        .route("/favorites/check/{external_id}/", get(favorites::check))
        .route("/favorites/{id}/", delete(favorites::remove))
        .with_state(state)
}
