use std::sync::Arc;

use crate::agent::prompt;
use crate::error::Result;
use crate::fetch::ContentFetcher;
use crate::llm::{GenerationRequest, TextGenerator};

/// Produces research summaries from a source page or from the model's own knowledge.
pub struct ResearchService {
    llm: Arc<dyn TextGenerator>,
    fetcher: Arc<dyn ContentFetcher>,
    firm: String,
    temperature: f32,
    max_source_chars: usize,
}

impl ResearchService {
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        fetcher: Arc<dyn ContentFetcher>,
        firm: &str,
        temperature: f32,
        max_source_chars: usize,
    ) -> Self {
        Self {
            llm,
            fetcher,
            firm: firm.to_string(),
            temperature,
            max_source_chars,
        }
    }

    /// Summarize the page at `url` for `topic`.
    ///
    /// Returns `Ok(None)` when the page cannot be fetched or the summary comes
    /// back empty; backend errors are returned as `Err`.
    pub async fn research_from_url(&self, url: &str, topic: &str) -> Result<Option<String>> {
        tracing::info!(url = %url, "Researching from URL");

        let Some(content) = self.fetcher.fetch(url).await else {
            return Ok(None);
        };

        tracing::info!(title = %content.title, "Analyzing fetched article");

        let body = truncate_chars(&content.body, self.max_source_chars);
        let request = GenerationRequest {
            system: prompt::system_prompt_for_source_analysis(&self.firm),
            user: prompt::source_analysis_message(topic, &content.title, body),
            temperature: self.temperature,
        };

        let findings = self.llm.generate(&request).await?;
        if findings.trim().is_empty() {
            tracing::warn!(url = %url, "Source analysis returned no content");
            return Ok(None);
        }

        Ok(Some(findings))
    }

    /// Research `topic` without an external source.
    pub async fn research_from_topic(&self, topic: &str, context: &str) -> Result<String> {
        tracing::info!(topic = %topic, "Researching topic");

        let request = GenerationRequest {
            system: prompt::system_prompt_for_topic_research(&self.firm),
            user: prompt::topic_research_message(topic, context),
            temperature: self.temperature,
        };

        self.llm.generate(&request).await
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
