//! JSON bodies of the HTTP surface.

use pokedex_library::catalog::{FilterView, Stats};
use pokedex_library::favorite::{FavoriteStatus, FavoriteToggle};
use pokedex_library::ingest::LoadSummary;
use pokedex_models::filter::{is_flying_and_tall, is_grass_type, matches_weight_filter};
use pokedex_models::{CreatureRecord, FavoriteMark};
use serde::{Deserialize, Serialize};
use time::UtcDateTime;
use time::format_description::well_known::Rfc3339;

fn rfc3339(at: UtcDateTime) -> String {
    // Only years outside 0..=9999 fail to format, which the store never holds.
    at.format(&Rfc3339).unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// Body of `POST /favorites/` and `POST /favorites/toggle/`.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    #[serde(alias = "pokemon_id")]
    pub external_id: u32,
}

/// A creature as shown in listings, filter views and favorites.
#[derive(Debug, Serialize)]
pub struct CreatureSummary {
    pub external_id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub reversed_name: String,
    pub types_display: String,
    pub height: u32,
    pub weight: u32,
    pub sprite_url: Option<String>,
}

impl From<&CreatureRecord> for CreatureSummary {
    fn from(record: &CreatureRecord) -> Self {
        let creature = &record.creature;
        Self {
            external_id: creature.external_id,
            name: creature.name.clone(),
            types: creature.types.clone(),
            reversed_name: creature.reversed_name(),
            types_display: creature.types_display(),
            height: creature.height,
            weight: creature.weight,
            sprite_url: creature.sprite_url.clone(),
        }
    }
}

/// A single creature with its timestamps and predicate results.
#[derive(Debug, Serialize)]
pub struct CreatureDetail {
    pub id: i64,
    #[serde(flatten)]
    pub summary: CreatureSummary,
    pub created_at: String,
    pub updated_at: String,
    pub matches_weight_filter: bool,
    pub is_grass_type: bool,
    pub is_flying_and_tall: bool,
}

impl From<&CreatureRecord> for CreatureDetail {
    fn from(record: &CreatureRecord) -> Self {
        Self {
            id: record.id,
            summary: CreatureSummary::from(record),
            created_at: rfc3339(record.created_at),
            updated_at: rfc3339(record.updated_at),
            matches_weight_filter: matches_weight_filter(&record.creature),
            is_grass_type: is_grass_type(&record.creature),
            is_flying_and_tall: is_flying_and_tall(&record.creature),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub results: Vec<CreatureSummary>,
    pub message: String,
}

impl From<&[CreatureRecord]> for ListResponse {
    fn from(records: &[CreatureRecord]) -> Self {
        Self {
            count: records.len(),
            results: records.iter().map(CreatureSummary::from).collect(),
            message: format!("First {} creatures", records.len()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub count: usize,
    pub results: Vec<CreatureSummary>,
    pub filter_applied: String,
    pub message: String,
}

impl From<&FilterView> for FilterResponse {
    fn from(view: &FilterView) -> Self {
        Self {
            count: view.count(),
            results: view.records.iter().map(CreatureSummary::from).collect(),
            filter_applied: view.filter.to_string(),
            message: format!("Found {} creatures matching {}", view.count(), view.filter),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub message: String,
    pub total_loaded: u32,
    pub errors: Vec<String>,
}

impl From<LoadSummary> for LoadResponse {
    fn from(summary: LoadSummary) -> Self {
        Self {
            message: summary.message(),
            total_loaded: summary.total_loaded,
            errors: summary.errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterStats {
    pub weight_30_80: usize,
    pub grass_type: usize,
    pub flying_tall: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_pokemon: usize,
    pub filters_stats: FilterStats,
    pub message: String,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_pokemon: stats.total,
            filters_stats: FilterStats {
                weight_30_80: stats.weight,
                grass_type: stats.grass,
                flying_tall: stats.flying_tall,
            },
            message: "Catalogue statistics".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub id: i64,
    pub pokemon: CreatureSummary,
    pub created_at: String,
}

impl From<&FavoriteMark> for FavoriteResponse {
    fn from(mark: &FavoriteMark) -> Self {
        Self {
            id: mark.id,
            pokemon: CreatureSummary::from(&mark.creature),
            created_at: rfc3339(mark.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub action: &'static str,
    pub message: String,
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<FavoriteResponse>,
}

impl From<&FavoriteToggle> for ToggleResponse {
    fn from(outcome: &FavoriteToggle) -> Self {
        match outcome {
            FavoriteToggle::Added(mark) => Self {
                action: "added",
                message: format!("{} added to favorites", mark.creature.creature.name),
                is_favorite: true,
                favorite: Some(FavoriteResponse::from(mark)),
            },
            FavoriteToggle::Removed(mark) => Self {
                action: "removed",
                message: format!("{} removed from favorites", mark.creature.creature.name),
                is_favorite: false,
                favorite: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub external_id: u32,
    pub name: String,
    pub is_favorite: bool,
}

impl From<&FavoriteStatus> for CheckResponse {
    fn from(status: &FavoriteStatus) -> Self {
        Self {
            external_id: status.creature.creature.external_id,
            name: status.creature.creature.name.clone(),
            is_favorite: status.is_favorite(),
        }
    }
}
