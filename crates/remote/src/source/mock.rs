//! In-memory creature source for testing.

use crate::CreatureSource;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use pokedex_models::Creature;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

/// Canned answer of a [`MockSource`] for one external identifier.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Creature(Creature),
    /// Answer with a non-success HTTP status.
    Status(u16),
    /// Fail immediately with [`ErrorKind::Timeout`]; no time actually passes.
    Timeout,
}

/// In-memory creature source for testing.
///
/// Responses are stored in a `HashMap` behind a [`RwLock`], so they can be
/// changed between calls through a shared reference. Identifiers without a
/// configured response answer with `HTTP 404`, like the real API. Every
/// requested identifier is recorded, in call order.
///
/// # Examples
///
/// ```
/// use pokedex_models::Creature;
/// use pokedex_remote::CreatureSource;
/// use pokedex_remote::source::{MockResponse, MockSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MockSource::with_creatures([Creature {
///     external_id: 1,
///     name: "bulbasaur".to_string(),
///     types: vec!["grass".to_string()],
///     height: 7,
///     weight: 69,
///     sprite_url: None,
/// }]);
/// assert_eq!(source.fetch(1).await.unwrap().name, "bulbasaur");
///
/// source.respond(1, MockResponse::Timeout).await;
/// assert!(source.fetch(1).await.is_err());
/// assert_eq!(source.requests().await, vec![1, 1]);
/// # }
/// ```
pub struct MockSource {
    name: String,
    responses: RwLock<HashMap<u32, MockResponse>>,
    requests: Mutex<Vec<u32>>,
}

impl MockSource {
    /// Create a mock source that knows the given creatures.
    pub fn with_creatures(creatures: impl IntoIterator<Item = Creature>) -> Self {
        let responses = creatures
            .into_iter()
            .map(|creature| (creature.external_id, MockResponse::Creature(creature)))
            .collect();
        Self {
            name: "mock".to_string(),
            responses: RwLock::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Change the name of the mock source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the response for one external identifier.
    pub async fn respond(&self, external_id: u32, response: MockResponse) {
        self.responses.write().await.insert(external_id, response);
    }

    /// Every identifier fetched so far, in call order.
    pub async fn requests(&self) -> Vec<u32> {
        self.requests.lock().await.clone()
    }
}
impl Default for MockSource {
    fn default() -> Self {
        Self::with_creatures([])
    }
}

#[async_trait]
impl CreatureSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, external_id: u32) -> Result<Creature> {
        self.requests.lock().await.push(external_id);
        let response = self.responses.read().await.get(&external_id).cloned();
        match response {
            Some(MockResponse::Creature(creature)) => Ok(creature),
            Some(MockResponse::Status(code)) => exn::bail!(ErrorKind::Status(code)),
            Some(MockResponse::Timeout) => exn::bail!(ErrorKind::Timeout),
            None => exn::bail!(ErrorKind::Status(404)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature(external_id: u32, name: &str) -> Creature {
        Creature {
            external_id,
            name: name.to_string(),
            types: vec!["normal".to_string()],
            height: 5,
            weight: 40,
            sprite_url: None,
        }
    }

    #[tokio::test]
    async fn test_known_creature_is_returned() {
        let source = MockSource::with_creatures([creature(16, "pidgey")]);
        assert_eq!(source.fetch(16).await.unwrap(), creature(16, "pidgey"));
    }

    #[tokio::test]
    async fn test_unknown_creature_is_not_found() {
        let source = MockSource::default();
        let err = source.fetch(9999).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(404));
    }

    #[tokio::test]
    async fn test_respond_overrides_creature() {
        let source = MockSource::with_creatures([creature(2, "ivysaur")]);
        source.respond(2, MockResponse::Timeout).await;
        assert_eq!(*source.fetch(2).await.unwrap_err(), ErrorKind::Timeout);
        source.respond(2, MockResponse::Status(503)).await;
        assert_eq!(*source.fetch(2).await.unwrap_err(), ErrorKind::Status(503));
    }

    #[tokio::test]
    async fn test_requests_are_recorded_in_order() {
        let source = MockSource::default().with_name("recorder");
        assert_eq!(source.name(), "recorder");
        for id in [3, 1, 2, 1] {
            let _ = source.fetch(id).await;
        }
        assert_eq!(source.requests().await, vec![3, 1, 2, 1]);
    }
}
