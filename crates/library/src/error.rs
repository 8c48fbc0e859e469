//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! The display text of the "not found" and "duplicate" variants is returned
//! to API clients verbatim.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the outcome of a failed catalogue operation.
///
/// ### Caller Errors
/// - [`ErrorKind::CreatureNotFound`]
/// - [`ErrorKind::FavoriteNotFound`]
/// - [`ErrorKind::DuplicateFavorite`]
/// - [`ErrorKind::InvalidRange`]
///
/// ### Dependency Errors
/// - [`ErrorKind::Store`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No creature record has this external identifier.
    #[display("creature {_0} not found")]
    CreatureNotFound(#[error(not(source))] u32),
    /// No favorite mark has this identifier.
    #[display("favorite {_0} not found")]
    FavoriteNotFound(#[error(not(source))] i64),
    /// The creature (named here) already has a favorite mark.
    #[display("{_0} is already in favorites")]
    DuplicateFavorite(#[error(not(source))] String),
    /// A [`pokedex_store::Repository`] operation failed.
    #[display("record store failure")]
    Store,
    /// An ingestion was requested over a range without any identifiers.
    #[display("invalid ingestion range {_0}..={_1}")]
    InvalidRange(u32, u32),
}
