use std::sync::Arc;

use crate::agent::prompt;
use crate::error::Result;
use crate::llm::{GenerationRequest, TextGenerator};

/// Inputs for a single article draft.
#[derive(Debug, Clone, Copy)]
pub struct ArticleBrief<'a> {
    pub topic: &'a str,
    pub research_findings: Option<&'a str>,
    pub category: &'a str,
    pub tags: &'a [String],
    pub additional_requirements: &'a str,
}

/// Drafts and revises articles. The returned document is not validated.
pub struct WritingService {
    llm: Arc<dyn TextGenerator>,
    author: String,
    temperature: f32,
}

impl WritingService {
    pub fn new(llm: Arc<dyn TextGenerator>, author: &str, temperature: f32) -> Self {
        Self {
            llm,
            author: author.to_string(),
            temperature,
        }
    }

    pub async fn write_article(&self, brief: &ArticleBrief<'_>) -> Result<String> {
        tracing::info!(topic = %brief.topic, "Writing article");

        let published = chrono::Local::now().format("%Y-%m-%d").to_string();
        let requirements = prompt::article_requirements(
            brief.category,
            brief.tags,
            &self.author,
            &published,
            brief.additional_requirements,
        );

        let request = GenerationRequest {
            system: prompt::system_prompt_for_writing(&self.author),
            user: prompt::writing_message(
                brief.topic,
                &prompt::research_section(brief.research_findings),
                &requirements,
            ),
            temperature: self.temperature,
        };

        let article = self.llm.generate(&request).await?;
        tracing::info!(chars = article.len(), "Article drafted");
        Ok(article)
    }

    /// Revise an existing article according to free-form notes.
    pub async fn revise_article(&self, article_content: &str, revision_notes: &str) -> Result<String> {
        tracing::info!("Revising article based on feedback");

        let request = GenerationRequest {
            system: prompt::system_prompt_for_revision(&self.author),
            user: prompt::revision_message(article_content, revision_notes),
            temperature: self.temperature,
        };

        let revised = self.llm.generate(&request).await?;
        tracing::info!(chars = revised.len(), "Article revised");
        Ok(revised)
    }
}
