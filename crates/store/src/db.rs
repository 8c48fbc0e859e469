//! SQLite pool setup for the catalogue database.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const MAX_CONNECTIONS: u32 = 5;

/// How long a statement waits for SQLite's single write lock before failing.
///
/// A favorite toggle takes the write lock with its first statement (a
/// `DELETE`), so concurrent toggles queue here one after the other.
const BUSY_TIMEOUT: Duration = Duration::from_millis(1500);

/// Settings with no [`SqliteConnectOptions`] equivalent, run on every new
/// pooled connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA wal_autocheckpoint = 800; PRAGMA temp_store = MEMORY;";

/// Connection pool for the catalogue, with migrations applied.
///
/// Convert it into a [`Repository`](crate::Repository) to run queries.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// The parent directory must already exist. WAL journaling lets listing
    /// and filter reads proceed while an ingestion run writes.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Opening catalogue database");
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        Self::open(options, MAX_CONNECTIONS).await
    }

    /// Open a private in-memory database.
    ///
    /// Every connection to `:memory:` sees its own empty database, so the pool
    /// holds exactly one. Not test-gated: other crates' tests use it too.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::open(SqliteConnectOptions::new().filename(":memory:"), 1).await
    }

    async fn open(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let options = options
            // Favorites cascade on creature deletion.
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::Executor::execute(&mut *conn, sqlx::raw_sql(CONNECTION_PRAGMAS)).await?;
                    Ok(())
                })
            })
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    #[instrument("applying catalogue migrations", skip(self))]
    async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Update planner statistics, then wait for every connection to be
    /// returned and close the pool. The database must not be used afterwards.
    pub async fn close(&self) {
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FavoriteToggle, Repository};
    use pokedex_models::Creature;

    fn pidgeot() -> Creature {
        Creature {
            external_id: 18,
            name: "pidgeot".to_string(),
            types: vec!["normal".to_string(), "flying".to_string()],
            height: 15,
            weight: 395,
            sprite_url: None,
        }
    }

    async fn pragma(db: &Database, name: &str) -> String {
        let sql = format!("PRAGMA {name}");
        let row: (String,) = sqlx::query_as(&sql).fetch_one(db.pool()).await.unwrap();
        row.0
    }

    #[tokio::test]
    async fn test_in_memory_close() {
        let db = Database::connect_in_memory().await.unwrap();
        assert!(!db.pool().is_closed());
        db.close().await;
        assert!(db.pool().is_closed());
    }

    #[tokio::test]
    async fn test_file_settings() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::connect(dir.path().join("catalogue.sqlite3")).await.unwrap();
        assert_eq!(pragma(&db, "journal_mode").await, "wal");
        assert_eq!(pragma(&db, "foreign_keys").await, "1");
        assert_eq!(pragma(&db, "busy_timeout").await, BUSY_TIMEOUT.as_millis().to_string());
        assert_eq!(pragma(&db, "wal_autocheckpoint").await, "800");
        db.close().await;
    }

    #[tokio::test]
    async fn test_reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.sqlite3");
        let db = Database::connect(&path).await.unwrap();
        Repository::from(&db).upsert_creature(&pidgeot()).await.unwrap();
        db.close().await;

        // Already-applied migrations are skipped on the second open.
        let db = Database::connect(&path).await.unwrap();
        let record = Repository::from(&db).get_creature(18).await.unwrap().unwrap();
        assert_eq!(record.creature, pidgeot());
        db.close().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_queue_on_write_lock() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::connect(dir.path().join("catalogue.sqlite3")).await.unwrap();
        let repo = Repository::from(&db);
        let record = repo.upsert_creature(&pidgeot()).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let (repo, record) = (repo.clone(), record.clone());
                tokio::spawn(async move { repo.toggle_favorite(&record).await })
            })
            .collect();
        let (mut added, mut removed) = (0, 0);
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                FavoriteToggle::Added(_) => added += 1,
                FavoriteToggle::Removed(_) => removed += 1,
            }
        }
        // Every toggle saw the state left by the previous one.
        assert_eq!((added, removed), (10, 10));
        assert!(repo.get_favorite_for(&record).await.unwrap().is_none());
        db.close().await;
    }
}
