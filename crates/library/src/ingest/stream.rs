use crate::ingest::error::{ErrorKind, Result};
use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use pokedex_models::CreatureRecord;
use pokedex_remote::CreatureSource;
use pokedex_store::Repository;
use std::ops::RangeInclusive;

/// Progress events emitted by [`ingest`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started) exactly once, with the number of identifiers.
/// 2. [`Loaded`](Self::Loaded) (or an `Err` item) once per identifier, in
///    ascending identifier order.
/// 3. [`Complete`](Self::Complete) exactly once.
#[derive(Debug)]
pub enum IngestEvent {
    Started { total: u32 },
    /// A creature was fetched and upserted; this is the stored record.
    Loaded(CreatureRecord),
    Complete,
}

/// Streams [`IngestEvent`]s while mirroring every identifier in `range` from
/// `source` into `repo`.
///
/// Identifiers are processed strictly one at a time: the next fetch does not
/// start until the previous upsert has finished. A failing identifier is
/// yielded as an `Err` item and the stream carries on with the next one.
pub fn ingest<'a>(
    source: &'a dyn CreatureSource,
    repo: &'a Repository,
    range: RangeInclusive<u32>,
) -> impl Stream<Item = Result<IngestEvent>> + 'a {
    stream!({
        // An inclusive range of u32 has at most 2^32 items; only the full
        // range overflows a u32 count, which saturates.
        let total = u32::try_from(range.clone().count()).unwrap_or(u32::MAX);
        tracing::info!(source = source.name(), first = range.start(), last = range.end(), "Starting ingestion");
        yield Ok(IngestEvent::Started { total });

        for external_id in range {
            let result = ingest_one(source, repo, external_id).await;
            match &result {
                Ok(record) => tracing::info!(external_id, name = %record.creature.name, "Creature loaded"),
                Err(err) => tracing::warn!(external_id, error = %*err, "Creature not loaded"),
            }
            yield result.map(IngestEvent::Loaded);
        }

        yield Ok(IngestEvent::Complete);
    })
}

async fn ingest_one(source: &dyn CreatureSource, repo: &Repository, external_id: u32) -> Result<CreatureRecord> {
    let creature = match source.fetch(external_id).await {
        Ok(creature) => creature,
        Err(err) => {
            let cause = (*err).clone();
            return Err(err).or_raise(|| ErrorKind::Fetch { external_id, cause });
        },
    };
    repo.upsert_creature(&creature).await.or_raise(|| ErrorKind::Store(external_id))
}
