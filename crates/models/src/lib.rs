//! Domain models for the local creature catalogue.
//!
//! A [`Creature`] is the data published by the remote source for a single
//! external identifier. Once persisted it becomes a [`CreatureRecord`], which
//! adds the local row identifier and server-assigned timestamps. A record can
//! be favorited at most once, producing a [`FavoriteMark`].
//!
//! The [`filter`] predicates and the [`display`] helpers are free functions
//! over a [`Creature`] so the listing, filtering and statistics paths all
//! share the exact same definitions.

mod creature;
pub mod display;
mod favorite;
pub mod filter;

pub use crate::creature::{Creature, CreatureRecord};
pub use crate::favorite::FavoriteMark;
pub use crate::filter::Filter;
