//! Creature source trait and implementations.
//!
//! This module defines the [`CreatureSource`] trait, which provides a single
//! lookup-by-identifier interface over wherever creature data comes from
//! (the public HTTP API in production, an in-memory map in tests).

mod http;
#[cfg(feature = "mock")]
mod mock;

pub use self::http::HttpSource;
#[cfg(feature = "mock")]
pub use self::mock::{MockResponse, MockSource};
use crate::error::Result;
use async_trait::async_trait;
use pokedex_models::Creature;

/// Unified interface for remote creature sources.
///
/// Implementations perform exactly one attempt per call. Retrying, batching
/// and deciding whether a failure is fatal are left to the caller.
///
/// # Examples
///
/// ```
/// use pokedex_remote::{CreatureSource, error::Result};
///
/// async fn name_of(source: &dyn CreatureSource, id: u32) -> Result<String> {
///     Ok(source.fetch(id).await?.name)
/// }
/// ```
#[async_trait]
pub trait CreatureSource: Send + Sync {
    /// Name of the source, used for logging only.
    fn name(&self) -> &str;

    /// Fetch a single creature by its external identifier.
    ///
    /// Returns [`Status`](crate::error::ErrorKind::Status) for any
    /// non-success answer (including "not found"),
    /// [`Timeout`](crate::error::ErrorKind::Timeout) when no answer arrives
    /// in time, and [`Decode`](crate::error::ErrorKind::Decode) when the
    /// answer does not describe a creature.
    async fn fetch(&self, external_id: u32) -> Result<Creature>;
}
