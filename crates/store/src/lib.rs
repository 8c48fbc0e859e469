//! SQLite record store for the creature catalogue.
//!
//! This crate owns the local copy of the remote creature data and the
//! favorites list. Unlike the remote source, this database *is* the source
//! of truth for favorites; creature rows can always be rebuilt by running
//! another ingestion.
//!
//! # Architecture
//! The store holds two tables:
//! - **creatures**: one row per external identifier. Re-ingesting the same
//!   external identifier updates the row in place (upsert).
//! - **favorites**: at most one row per creature, enforced by a `UNIQUE`
//!   constraint on the creature reference. Deleting a creature cascades to
//!   its favorite.

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::Database;
pub use crate::repo::{FavoriteInsert, FavoriteToggle, Repository};
