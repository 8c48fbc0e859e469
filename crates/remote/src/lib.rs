//! Remote creature-data sources.
//!
//! The catalogue mirrors a third-party creature API. That API is treated as
//! an untrusted, possibly-failing dependency: every call is bounded by a
//! timeout and nothing is ever retried here. Callers decide what a failure
//! means for them.

pub mod error;
mod payload;
pub mod source;

pub use crate::source::CreatureSource;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn CreatureSource + Send + Sync>;
