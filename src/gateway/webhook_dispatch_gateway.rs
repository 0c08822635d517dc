use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::domain::entity::{Category, DispatchPayload};
use crate::domain::gateway::{DispatchError, DispatchGateway};

/// Posts payloads as JSON to the automation webhook. Categories may override
/// the default endpoint.
#[derive(Clone, Debug)]
pub struct WebhookDispatchGateway {
    client: Client,
    default_url: String,
    category_urls: HashMap<Category, String>,
}

impl WebhookDispatchGateway {
    pub fn new(
        default_url: String,
        category_urls: HashMap<Category, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            default_url,
            category_urls,
        })
    }

    pub fn url_for(&self, category: Category) -> &str {
        self.category_urls
            .get(&category)
            .unwrap_or(&self.default_url)
    }
}

impl DispatchGateway for WebhookDispatchGateway {
    async fn dispatch(&self, payload: &DispatchPayload) -> Result<(), DispatchError> {
        let category = payload.category();
        let url = self.url_for(category);
        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| classify_error(url, err))?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;
        if !status.is_success() {
            warn!(%category, url, status = status.as_u16(), latency_ms, "Automation webhook rejected dispatch");
            return Err(DispatchError::Rejected(status.as_u16()));
        }
        info!(%category, url, status = status.as_u16(), latency_ms, "Dispatched to automation webhook");
        Ok(())
    }
}

fn classify_error(url: &str, err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::TimedOut(url.into());
    }
    if err.is_connect() {
        return DispatchError::Unreachable(url.into());
    }
    DispatchError::Other(
        anyhow::Error::from(err).context(format!("Network error communicating with {url}")),
    )
}
