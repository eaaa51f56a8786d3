//! In-memory fakes for the generative backend and the page fetcher.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::fetch::{ContentFetcher, FetchedContent};
use crate::llm::{GenerationRequest, TextGenerator};

type Reply = std::result::Result<String, String>;

/// Replies from a script first, then with a fixed fallback reply.
pub struct FakeGenerator {
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self::scripted(Vec::new(), Ok(text.to_string()))
    }

    pub fn failing(error: &str) -> Self {
        Self::scripted(Vec::new(), Err(error.to_string()))
    }

    pub fn scripted(script: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        reply.map_err(AppError::Llm)
    }
}

/// Serves one canned page, or nothing at all.
pub struct FakeFetcher {
    page: Option<FetchedContent>,
}

impl FakeFetcher {
    pub fn page(title: &str, body: &str) -> Self {
        Self {
            page: Some(FetchedContent {
                title: title.to_string(),
                body: body.to_string(),
                url: String::new(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self { page: None }
    }
}

#[async_trait]
impl ContentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Option<FetchedContent> {
        self.page.clone().map(|mut page| {
            page.url = url.to_string();
            page
        })
    }
}
