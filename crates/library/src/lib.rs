//! Catalogue operations on top of the record store and a remote source.
//!
//! - [`ingest`]: mirror a range of creatures from a remote source.
//! - [`catalog`]: listing, detail, filter views and statistics.
//! - [`favorite`]: the favorites list and the favorite toggle.

pub mod catalog;
pub mod error;
pub mod favorite;
pub mod ingest;
