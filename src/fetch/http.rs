use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::FetcherConfig;
use crate::error::Result;
use crate::fetch::{html, ContentFetcher, FetchedContent};

/// Fetches pages over HTTP with a fixed request timeout.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Self {
        Self {
            client: Client::new(),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn get_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<FetchedContent> {
        let document = match self.get_html(url).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to fetch page");
                return None;
            }
        };

        match html::extract(&document, url) {
            Ok(content) => {
                tracing::info!(url = %url, title = %content.title, "Fetched page");
                Some(content)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to extract page content");
                None
            }
        }
    }
}
