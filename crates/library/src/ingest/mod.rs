//! Mirroring creatures from a remote source into the record store.
//!
//! An ingestion run walks an inclusive range of external identifiers in
//! ascending order, one at a time. Each identifier is fetched and upserted
//! independently: a failure is reported and the run moves on to the next
//! identifier. Nothing is retried and nothing already written is rolled back.
//!
//! [`ingest`] exposes the run as a stream of progress events; [`load`]
//! drives that stream to completion and condenses it into a [`LoadSummary`].

pub mod error;
mod stream;

pub use self::stream::{IngestEvent, ingest};
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use futures::StreamExt;
use pokedex_remote::CreatureSource;
use pokedex_store::Repository;
use std::ops::RangeInclusive;

/// Maximum number of error messages kept in a [`LoadSummary`].
pub const MAX_REPORTED_ERRORS: usize = 5;

/// Outcome of a complete ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of identifiers in the requested range.
    pub attempted: u32,
    /// Number of creatures fetched and upserted successfully.
    pub total_loaded: u32,
    /// Number of identifiers that failed, including unreported ones.
    pub failed: u32,
    /// The first [`MAX_REPORTED_ERRORS`] failure messages, in range order.
    pub errors: Vec<String>,
}

impl LoadSummary {
    pub fn message(&self) -> String {
        format!("Load complete: {}/{} creatures loaded", self.total_loaded, self.attempted)
    }
}

/// Run a whole ingestion over `range` and summarize it.
///
/// Per-identifier failures end up in [`LoadSummary::errors`]; they never make
/// this function fail.
pub async fn load(
    source: &dyn CreatureSource,
    repo: &Repository,
    range: RangeInclusive<u32>,
) -> LibraryResult<LoadSummary> {
    let mut summary = LoadSummary {
        attempted: 0,
        total_loaded: 0,
        failed: 0,
        errors: Vec::new(),
    };
    if range.is_empty() {
        exn::bail!(LibraryErrorKind::InvalidRange(*range.start(), *range.end()));
    }
    let events = ingest(source, repo, range);
    futures::pin_mut!(events);
    while let Some(event) = events.next().await {
        match event {
            Ok(IngestEvent::Started { total }) => summary.attempted = total,
            Ok(IngestEvent::Loaded(_)) => summary.total_loaded += 1,
            Ok(IngestEvent::Complete) => {},
            Err(err) => {
                summary.failed += 1;
                if summary.errors.len() < MAX_REPORTED_ERRORS {
                    summary.errors.push((*err).to_string());
                }
            },
        }
    }
    tracing::info!(
        attempted = summary.attempted,
        loaded = summary.total_loaded,
        failed = summary.failed,
        "Ingestion finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_models::Creature;
    use pokedex_remote::source::{MockResponse, MockSource};
    use pokedex_store::Database;

    fn creature(external_id: u32) -> Creature {
        Creature {
            external_id,
            name: format!("creature-{external_id}"),
            types: vec!["normal".to_string()],
            height: 10,
            weight: 50,
            sprite_url: None,
        }
    }

    async fn repo() -> Repository {
        Repository::from(&Database::connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_and_skipped() {
        let repo = repo().await;
        let source = MockSource::with_creatures((1..=3).map(creature));
        source.respond(2, MockResponse::Timeout).await;

        let summary = load(&source, &repo, 1..=3).await.unwrap();
        assert_eq!(summary.total_loaded, 2);
        assert_eq!(summary.errors, vec!["creature #2: request timed out".to_string()]);
        assert_eq!(summary.message(), "Load complete: 2/3 creatures loaded");
        assert!(repo.get_creature(1).await.unwrap().is_some());
        assert!(repo.get_creature(2).await.unwrap().is_none());
        assert!(repo.get_creature(3).await.unwrap().is_some());
        assert_eq!(source.requests().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_only_first_five_errors_are_reported() {
        let repo = repo().await;
        // Nothing is known to the source: every identifier answers 404.
        let source = MockSource::default();
        let summary = load(&source, &repo, 1..=8).await.unwrap();
        assert_eq!(summary.total_loaded, 0);
        assert_eq!(summary.failed, 8);
        assert_eq!(summary.errors.len(), MAX_REPORTED_ERRORS);
        assert_eq!(summary.errors[0], "creature #1: HTTP 404");
        assert_eq!(summary.errors[4], "creature #5: HTTP 404");
    }

    #[tokio::test]
    async fn test_reingestion_updates_in_place() {
        let repo = repo().await;
        let source = MockSource::with_creatures((1..=3).map(creature));
        load(&source, &repo, 1..=3).await.unwrap();

        let mut evolved = creature(2);
        evolved.name = "evolved".to_string();
        evolved.weight = 70;
        source.respond(2, MockResponse::Creature(evolved.clone())).await;
        let summary = load(&source, &repo, 1..=3).await.unwrap();

        assert_eq!(summary.total_loaded, 3);
        assert!(summary.errors.is_empty());
        assert_eq!(repo.count_creatures().await.unwrap(), 3);
        assert_eq!(repo.get_creature(2).await.unwrap().unwrap().creature, evolved);
    }

    #[tokio::test]
    async fn test_empty_range_is_rejected() {
        let repo = repo().await;
        let source = MockSource::default();
        #[allow(clippy::reversed_empty_ranges)]
        let err = load(&source, &repo, 5..=4).await.unwrap_err();
        assert!(matches!(*err, LibraryErrorKind::InvalidRange(5, 4)));
        assert!(source.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_previously_loaded_record() {
        let repo = repo().await;
        let source = MockSource::with_creatures([creature(1)]);
        load(&source, &repo, 1..=1).await.unwrap();
        source.respond(1, MockResponse::Status(503)).await;

        let summary = load(&source, &repo, 1..=1).await.unwrap();
        assert_eq!(summary.errors, vec!["creature #1: HTTP 503".to_string()]);
        assert_eq!(repo.get_creature(1).await.unwrap().unwrap().creature, creature(1));
    }
}
