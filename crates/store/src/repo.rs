//! Combined repository for creature records and their favorite marks.
//!
//! They're tightly coupled: a favorite cannot exist without its creature, and
//! deleting a creature takes its favorite with it (`ON DELETE CASCADE`).

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{CreatureParams, CreatureRow, FavoriteRow, MarkRow};
use exn::ResultExt;
use pokedex_models::{Creature, CreatureRecord, FavoriteMark};
use sqlx::SqlitePool;
use time::UtcDateTime;
use tracing::instrument;

/// Outcome of trying to favorite a creature.
#[derive(Debug, Eq, PartialEq)]
pub enum FavoriteInsert {
    /// A new mark was created.
    Created(FavoriteMark),
    /// The creature was already favorited; the existing mark is returned
    /// untouched.
    AlreadyFavorited(FavoriteMark),
}

/// Outcome of toggling a creature's favorite state.
#[derive(Debug, Eq, PartialEq)]
pub enum FavoriteToggle {
    /// The creature is now favorited.
    Added(FavoriteMark),
    /// The creature's mark was removed; this is the mark as it was.
    Removed(FavoriteMark),
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Repository for creature records and favorites in the catalogue database.
///
/// # Relationships
///
/// - A creature is identified externally by its remote `external_id` and
///   internally by its row `id`; favorites reference the row `id`.
/// - A creature has at most one favorite mark (`UNIQUE (creature_id)`).
/// - Deleting a creature cascades to delete its favorite mark.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    // =========================================================================
    // Creatures
    // =========================================================================

    /// Insert a creature, or overwrite every field of the existing record
    /// with the same external identifier.
    ///
    /// `created_at` is only ever set on first insert; `updated_at` is bumped
    /// on every call, even when the data is unchanged.
    #[instrument(skip(self, creature), fields(external_id = creature.external_id))]
    pub async fn upsert_creature(&self, creature: &Creature) -> Result<CreatureRecord> {
        let params = CreatureParams::try_from(creature)?;
        let now = UtcDateTime::now().unix_timestamp();
        let row: CreatureRow = sqlx::query_as(include_str!("../queries/upsert_creature.sql"))
            .bind(params.external_id)
            .bind(params.name)
            .bind(params.types)
            .bind(params.height)
            .bind(params.weight)
            .bind(params.sprite_url)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.try_into()
    }

    /// Get a creature by its remote identifier.
    pub async fn get_creature(&self, external_id: u32) -> Result<Option<CreatureRecord>> {
        let row: Option<CreatureRow> = sqlx::query_as(include_str!("../queries/get_creature_by_external_id.sql"))
            .bind(i64::from(external_id))
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    /// List the first `limit` creatures, ascending by external identifier.
    pub async fn list_creatures(&self, limit: usize) -> Result<Vec<CreatureRecord>> {
        let limit = i64::try_from(limit).or_raise(|| ErrorKind::InvalidData("limit"))?;
        let rows: Vec<CreatureRow> = sqlx::query_as(include_str!("../queries/list_creatures.sql"))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// List every creature, ascending by external identifier.
    pub async fn list_all_creatures(&self) -> Result<Vec<CreatureRecord>> {
        let rows: Vec<CreatureRow> = sqlx::query_as(include_str!("../queries/list_all_creatures.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Count the total number of creature records.
    pub async fn count_creatures(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(include_str!("../queries/count_creatures.sql"))
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("count"))
    }

    /// Delete a creature by its remote identifier, cascading to its favorite.
    ///
    /// Returns `true` if a record was deleted, `false` if it was not found.
    pub async fn delete_creature(&self, external_id: u32) -> Result<bool> {
        let result = sqlx::query(include_str!("../queries/delete_creature_by_external_id.sql"))
            .bind(i64::from(external_id))
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// List all favorites with their creatures, newest first.
    pub async fn list_favorites(&self) -> Result<Vec<FavoriteMark>> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(include_str!("../queries/list_favorites.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Get a favorite by its own identifier.
    pub async fn get_favorite(&self, id: i64) -> Result<Option<FavoriteMark>> {
        let row: Option<FavoriteRow> = sqlx::query_as(include_str!("../queries/get_favorite_by_id.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    /// Get the favorite mark of a creature, if it has one.
    pub async fn get_favorite_for(&self, creature: &CreatureRecord) -> Result<Option<FavoriteMark>> {
        let row: Option<FavoriteRow> = sqlx::query_as(include_str!("../queries/get_favorite_by_creature_id.sql"))
            .bind(creature.id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|r| r.try_into()).transpose()
    }

    /// Favorite a creature.
    ///
    /// The `UNIQUE` constraint on the creature reference is what decides: a
    /// concurrent insert that loses the race is reported as
    /// [`FavoriteInsert::AlreadyFavorited`] rather than as an error.
    #[instrument(skip(self, creature), fields(external_id = creature.creature.external_id))]
    pub async fn add_favorite(&self, creature: &CreatureRecord) -> Result<FavoriteInsert> {
        let inserted: std::result::Result<MarkRow, sqlx::Error> =
            sqlx::query_as(include_str!("../queries/insert_favorite.sql"))
                .bind(creature.id)
                .bind(UtcDateTime::now().unix_timestamp())
                .fetch_one(&self.pool)
                .await;
        match inserted {
            Ok(mark) => Ok(FavoriteInsert::Created(mark.into_mark(creature.clone())?)),
            Err(err) if is_unique_violation(&err) => Ok(FavoriteInsert::AlreadyFavorited(self.existing_favorite(creature).await?)),
            Err(err) => Err(err).or_raise(|| ErrorKind::Database),
        }
    }

    /// Flip a creature's favorite state in a single transaction.
    ///
    /// The `DELETE` runs first so the transaction takes SQLite's write lock
    /// before deciding; a concurrent toggle for the same creature waits for
    /// this one to commit instead of also observing "no mark".
    #[instrument(skip(self, creature), fields(external_id = creature.creature.external_id))]
    pub async fn toggle_favorite(&self, creature: &CreatureRecord) -> Result<FavoriteToggle> {
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let removed: Option<MarkRow> = sqlx::query_as(include_str!("../queries/delete_favorite_by_creature_id.sql"))
            .bind(creature.id)
            .fetch_optional(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if let Some(mark) = removed {
            tx.commit().await.or_raise(|| ErrorKind::Database)?;
            return Ok(FavoriteToggle::Removed(mark.into_mark(creature.clone())?));
        }
        let inserted: std::result::Result<MarkRow, sqlx::Error> =
            sqlx::query_as(include_str!("../queries/insert_favorite.sql"))
                .bind(creature.id)
                .bind(UtcDateTime::now().unix_timestamp())
                .fetch_one(&mut *tx)
                .await;
        match inserted {
            Ok(mark) => {
                tx.commit().await.or_raise(|| ErrorKind::Database)?;
                Ok(FavoriteToggle::Added(mark.into_mark(creature.clone())?))
            },
            Err(err) if is_unique_violation(&err) => {
                tx.rollback().await.or_raise(|| ErrorKind::Database)?;
                tracing::debug!("Favorite created concurrently; reporting existing mark");
                Ok(FavoriteToggle::Added(self.existing_favorite(creature).await?))
            },
            Err(err) => Err(err).or_raise(|| ErrorKind::Database),
        }
    }

    /// Delete a favorite by its own identifier.
    ///
    /// Returns `true` if a mark was deleted, `false` if it was not found.
    pub async fn delete_favorite(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(include_str!("../queries/delete_favorite_by_id.sql"))
            .bind(id)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the mark that a failed insert collided with.
    async fn existing_favorite(&self, creature: &CreatureRecord) -> Result<FavoriteMark> {
        match self.get_favorite_for(creature).await? {
            Some(mark) => Ok(mark),
            // The colliding mark was removed again before we could read it.
            None => exn::bail!(ErrorKind::Database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature(external_id: u32, name: &str, types: &[&str], height: u32, weight: u32) -> Creature {
        Creature {
            external_id,
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            height,
            weight,
            sprite_url: Some(format!("https://example.test/sprites/{external_id}.png")),
        }
    }

    async fn repo() -> Repository {
        let db = Database::connect_in_memory().await.unwrap();
        Repository::from(&db)
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = repo().await;
        let created = repo.upsert_creature(&creature(1, "bulbasaur", &["grass", "poison"], 7, 69)).await.unwrap();
        let fetched = repo.get_creature(1).await.unwrap().unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.creature.types, vec!["grass".to_string(), "poison".to_string()]);
        assert!(repo.get_creature(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place() {
        let repo = repo().await;
        let first = repo.upsert_creature(&creature(25, "pikachu", &["electric"], 4, 60)).await.unwrap();
        let second = repo.upsert_creature(&creature(25, "raichu", &["electric"], 8, 300)).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.creature.name, "raichu");
        assert_eq!(second.creature.weight, 300);
        assert_eq!(repo.count_creatures().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_listing_is_ordered_and_limited() {
        let repo = repo().await;
        for id in [5, 3, 9, 1, 7] {
            repo.upsert_creature(&creature(id, "creature", &["normal"], 1, 1)).await.unwrap();
        }
        let ids = |records: Vec<CreatureRecord>| records.into_iter().map(|r| r.creature.external_id).collect::<Vec<_>>();
        assert_eq!(ids(repo.list_creatures(3).await.unwrap()), vec![1, 3, 5]);
        assert_eq!(ids(repo.list_all_creatures().await.unwrap()), vec![1, 3, 5, 7, 9]);
    }

    #[tokio::test]
    async fn test_add_favorite_rejects_duplicates() {
        let repo = repo().await;
        let record = repo.upsert_creature(&creature(1, "bulbasaur", &["grass"], 7, 69)).await.unwrap();
        let FavoriteInsert::Created(mark) = repo.add_favorite(&record).await.unwrap() else {
            panic!("first insert should create a mark");
        };
        let FavoriteInsert::AlreadyFavorited(existing) = repo.add_favorite(&record).await.unwrap() else {
            panic!("second insert should collide");
        };
        assert_eq!(mark.id, existing.id);
        assert_eq!(repo.list_favorites().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_twice_is_identity() {
        let repo = repo().await;
        let record = repo.upsert_creature(&creature(6, "charizard", &["fire", "flying"], 17, 905)).await.unwrap();
        assert!(matches!(repo.toggle_favorite(&record).await.unwrap(), FavoriteToggle::Added(_)));
        assert!(repo.get_favorite_for(&record).await.unwrap().is_some());
        assert!(matches!(repo.toggle_favorite(&record).await.unwrap(), FavoriteToggle::Removed(_)));
        assert!(repo.get_favorite_for(&record).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_favorite_by_id() {
        let repo = repo().await;
        let record = repo.upsert_creature(&creature(1, "bulbasaur", &["grass"], 7, 69)).await.unwrap();
        let FavoriteInsert::Created(mark) = repo.add_favorite(&record).await.unwrap() else {
            panic!("first insert should create a mark");
        };
        assert!(repo.get_favorite(mark.id).await.unwrap().is_some());
        assert!(repo.delete_favorite(mark.id).await.unwrap());
        assert!(!repo.delete_favorite(mark.id).await.unwrap());
        assert!(repo.get_favorite(mark.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_favorites_are_newest_first() {
        let repo = repo().await;
        for id in 1..=3 {
            let record = repo.upsert_creature(&creature(id, "creature", &["normal"], 1, 1)).await.unwrap();
            repo.add_favorite(&record).await.unwrap();
        }
        // Marks created within the same second are ordered by id.
        let ids = repo.list_favorites().await.unwrap().into_iter().map(|f| f.creature.creature.external_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_deleting_creature_cascades_to_favorite() {
        let repo = repo().await;
        let record = repo.upsert_creature(&creature(12, "butterfree", &["bug", "flying"], 11, 320)).await.unwrap();
        repo.add_favorite(&record).await.unwrap();
        assert!(repo.delete_creature(12).await.unwrap());
        assert!(repo.list_favorites().await.unwrap().is_empty());
        assert!(!repo.delete_creature(12).await.unwrap());
    }
}
