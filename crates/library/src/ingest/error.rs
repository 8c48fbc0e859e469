//! Error types for the [`ingest`](super) module.
//!
//! Every variant describes the failure of a single external identifier. They
//! are yielded as items of the ingestion stream and never end it.

use derive_more::{Display, Error};
use pokedex_remote::error::ErrorKind as RemoteErrorKind;

/// An ingestion error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why one identifier of an ingestion run was not loaded.
///
/// The display text is what ends up in the error list of a
/// [`LoadSummary`](super::LoadSummary).
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote source did not deliver the creature.
    #[display("creature #{external_id}: {cause}")]
    Fetch {
        external_id: u32,
        #[error(not(source))]
        cause: RemoteErrorKind,
    },
    /// The creature was fetched but could not be written to the store.
    #[display("creature #{_0}: could not be saved")]
    Store(#[error(not(source))] u32),
}

impl ErrorKind {
    pub fn external_id(&self) -> u32 {
        match self {
            Self::Fetch { external_id, .. } => *external_id,
            Self::Store(external_id) => *external_id,
        }
    }
}
