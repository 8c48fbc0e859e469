//! Read-only views over the record store: listing, detail, filters and stats.
//!
//! Filters and statistics both go through [`Filter::matches`], so a stats
//! count always equals the size of the matching filter view for the same
//! snapshot of the store.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pokedex_models::{CreatureRecord, Filter};
use pokedex_store::Repository;

/// Number of records in the main listing.
pub const LISTING_LIMIT: usize = 50;

/// The first [`LISTING_LIMIT`] records, ascending by external identifier.
pub async fn list(repo: &Repository) -> Result<Vec<CreatureRecord>> {
    repo.list_creatures(LISTING_LIMIT).await.or_raise(|| ErrorKind::Store)
}

/// A single record by external identifier.
pub async fn detail(repo: &Repository, external_id: u32) -> Result<CreatureRecord> {
    match repo.get_creature(external_id).await.or_raise(|| ErrorKind::Store)? {
        Some(record) => Ok(record),
        None => exn::bail!(ErrorKind::CreatureNotFound(external_id)),
    }
}

/// Records matching one filter, ascending by external identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    pub filter: Filter,
    pub records: Vec<CreatureRecord>,
}

impl FilterView {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Evaluate `filter` against every record in the store.
pub async fn filter(repo: &Repository, filter: Filter) -> Result<FilterView> {
    let records = repo.list_all_creatures().await.or_raise(|| ErrorKind::Store)?;
    Ok(FilterView {
        filter,
        records: records.into_iter().filter(|r| filter.matches(&r.creature)).collect(),
    })
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub weight: usize,
    pub grass: usize,
    pub flying_tall: usize,
}

impl Stats {
    fn from_records(records: &[CreatureRecord]) -> Self {
        let count = |filter: Filter| records.iter().filter(|r| filter.matches(&r.creature)).count();
        Self {
            total: records.len(),
            weight: count(Filter::Weight),
            grass: count(Filter::Grass),
            flying_tall: count(Filter::FlyingTall),
        }
    }

    pub fn count(&self, filter: Filter) -> usize {
        match filter {
            Filter::Weight => self.weight,
            Filter::Grass => self.grass,
            Filter::FlyingTall => self.flying_tall,
        }
    }
}

pub async fn stats(repo: &Repository) -> Result<Stats> {
    let records = repo.list_all_creatures().await.or_raise(|| ErrorKind::Store)?;
    Ok(Stats::from_records(&records))
}
