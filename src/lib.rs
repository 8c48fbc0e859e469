//! HTTP surface of the creature catalogue.
//!
//! The binary in `main.rs` wires configuration, the record store and the
//! remote source together and serves [`router`].

mod http;

pub use crate::http::{AppState, router};
