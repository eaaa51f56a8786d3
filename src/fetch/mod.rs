pub mod html;
pub mod http;

use async_trait::async_trait;

pub use http::HttpFetcher;

/// Title and body text extracted from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    pub title: String,
    pub body: String,
    pub url: String,
}

/// Retrieves a page and extracts its readable text.
///
/// Implementations never fail loudly: any network, status or parse problem
/// yields `None`.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<FetchedContent>;
}
