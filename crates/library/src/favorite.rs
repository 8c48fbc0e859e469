//! Favorite marks: add, remove, toggle and check.
//!
//! Every operation takes the creature's external identifier, except removal,
//! which uses the mark's own identifier.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pokedex_models::{CreatureRecord, FavoriteMark};
use pokedex_store::{FavoriteInsert, Repository};
use tracing::instrument;

pub use pokedex_store::FavoriteToggle;

/// Whether a creature currently has a favorite mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteStatus {
    pub creature: CreatureRecord,
    pub favorite: Option<FavoriteMark>,
}

impl FavoriteStatus {
    pub fn is_favorite(&self) -> bool {
        self.favorite.is_some()
    }
}

async fn creature(repo: &Repository, external_id: u32) -> Result<CreatureRecord> {
    match repo.get_creature(external_id).await.or_raise(|| ErrorKind::Store)? {
        Some(record) => Ok(record),
        None => exn::bail!(ErrorKind::CreatureNotFound(external_id)),
    }
}

/// All favorite marks, newest first.
pub async fn list(repo: &Repository) -> Result<Vec<FavoriteMark>> {
    repo.list_favorites().await.or_raise(|| ErrorKind::Store)
}

/// Favorite a creature, failing if it already is.
#[instrument(skip(repo))]
pub async fn add(repo: &Repository, external_id: u32) -> Result<FavoriteMark> {
    let record = creature(repo, external_id).await?;
    match repo.add_favorite(&record).await.or_raise(|| ErrorKind::Store)? {
        FavoriteInsert::Created(mark) => {
            tracing::info!(favorite_id = mark.id, "Favorite added");
            Ok(mark)
        },
        FavoriteInsert::AlreadyFavorited(_) => exn::bail!(ErrorKind::DuplicateFavorite(record.creature.name)),
    }
}

/// Remove a favorite mark by its own identifier, returning the removed mark.
#[instrument(skip(repo))]
pub async fn remove(repo: &Repository, favorite_id: i64) -> Result<FavoriteMark> {
    let Some(mark) = repo.get_favorite(favorite_id).await.or_raise(|| ErrorKind::Store)? else {
        exn::bail!(ErrorKind::FavoriteNotFound(favorite_id));
    };
    // Someone else may have removed it in between; that is still "not found".
    if !repo.delete_favorite(favorite_id).await.or_raise(|| ErrorKind::Store)? {
        exn::bail!(ErrorKind::FavoriteNotFound(favorite_id));
    }
    tracing::info!(external_id = mark.creature.creature.external_id, "Favorite removed");
    Ok(mark)
}

/// Add a mark if the creature has none, otherwise remove it.
#[instrument(skip(repo))]
pub async fn toggle(repo: &Repository, external_id: u32) -> Result<FavoriteToggle> {
    let record = creature(repo, external_id).await?;
    let outcome = repo.toggle_favorite(&record).await.or_raise(|| ErrorKind::Store)?;
    match &outcome {
        FavoriteToggle::Added(mark) => tracing::info!(favorite_id = mark.id, "Favorite toggled on"),
        FavoriteToggle::Removed(mark) => tracing::info!(favorite_id = mark.id, "Favorite toggled off"),
    }
    Ok(outcome)
}

/// Report whether a creature is favorited, without changing anything.
pub async fn check(repo: &Repository, external_id: u32) -> Result<FavoriteStatus> {
    let record = creature(repo, external_id).await?;
    let favorite = repo.get_favorite_for(&record).await.or_raise(|| ErrorKind::Store)?;
    Ok(FavoriteStatus { creature: record, favorite })
}
