//! HTTP creature source backed by the public creature API.

use crate::CreatureSource;
use crate::error::{ErrorKind, Result};
use crate::payload::CreaturePayload;
use async_trait::async_trait;
use exn::ResultExt;
use pokedex_models::Creature;
use std::time::Duration;
use tracing::instrument;

/// Classify a `reqwest` failure into an [`ErrorKind`], keeping the reqwest
/// error as the child of the raised one.
fn classify<T>(result: std::result::Result<T, reqwest::Error>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let kind = ErrorKind::from(&err);
            Err(err).or_raise(|| kind)
        },
    }
}

/// Fetches creatures from `{base_url}/pokemon/{id}`.
///
/// Every request (connect, send and body read) is bounded by the timeout
/// given at construction.
#[derive(Debug, Clone)]
pub struct HttpSource {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = classify(
            reqwest::Client::builder()
                .timeout(timeout)
                .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
                .build(),
        )?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            exn::bail!(ErrorKind::Config("empty base URL".to_string()));
        }
        Ok(Self {
            name: "http".to_string(),
            base_url,
            client,
        })
    }

    fn url(&self, external_id: u32) -> String {
        format!("{}/pokemon/{external_id}", self.base_url)
    }
}

#[async_trait]
impl CreatureSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(source = %self.name))]
    async fn fetch(&self, external_id: u32) -> Result<Creature> {
        let response = classify(self.client.get(self.url(external_id)).send().await)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let payload = classify(response.json::<CreaturePayload>().await)?;
        Ok(Creature::from(payload))
    }
}
