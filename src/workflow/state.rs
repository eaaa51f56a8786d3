use crate::config::default_category;
use crate::error::{AppError, Result};

/// Caller-supplied inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct ArticleRequest {
    pub topic: String,
    pub research_url: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub additional_requirements: String,
    pub output_filename: Option<String>,
}

impl ArticleRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            research_url: None,
            category: default_category(),
            tags: Vec::new(),
            additional_requirements: String::new(),
            output_filename: None,
        }
    }

    pub fn with_research_url(mut self, url: impl Into<String>) -> Self {
        self.research_url = Some(url.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.additional_requirements = requirements.into();
        self
    }

    pub fn with_output_filename(mut self, filename: impl Into<String>) -> Self {
        self.output_filename = Some(filename.into());
        self
    }
}

/// State threaded through the research, write and save stages of one run.
///
/// Inputs are frozen at construction. Stages only touch their own output
/// fields through the crate-private recorders below.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    inputs: ArticleRequest,
    research_findings: Option<String>,
    article_content: String,
    output_filename: Option<String>,
    messages: Vec<String>,
    error: Option<String>,
}

impl WorkflowState {
    pub fn new(mut inputs: ArticleRequest) -> Result<Self> {
        if inputs.topic.trim().is_empty() {
            return Err(AppError::InvalidInput("Topic is required".to_string()));
        }

        inputs.research_url = inputs
            .research_url
            .take()
            .filter(|url| !url.trim().is_empty());

        let output_filename = inputs
            .output_filename
            .clone()
            .filter(|name| !name.trim().is_empty());

        Ok(Self {
            inputs,
            research_findings: None,
            article_content: String::new(),
            output_filename,
            messages: Vec::new(),
            error: None,
        })
    }

    pub fn inputs(&self) -> &ArticleRequest {
        &self.inputs
    }

    pub fn topic(&self) -> &str {
        &self.inputs.topic
    }

    pub fn research_findings(&self) -> Option<&str> {
        self.research_findings.as_deref()
    }

    pub fn article_content(&self) -> &str {
        &self.article_content
    }

    pub fn output_filename(&self) -> Option<&str> {
        self.output_filename.as_deref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub(crate) fn record_research(&mut self, findings: String, message: String) {
        self.research_findings = Some(findings);
        self.messages.push(message);
    }

    pub(crate) fn record_article(&mut self, content: String, message: String) {
        self.article_content = content;
        self.messages.push(message);
    }

    /// Sets the filename unless one is already present.
    pub(crate) fn set_output_filename(&mut self, filename: String) {
        self.output_filename.get_or_insert(filename);
    }

    pub(crate) fn push_message(&mut self, message: String) {
        self.messages.push(message);
    }

    /// The most recent failure wins.
    pub(crate) fn record_error(&mut self, error: String) {
        self.error = Some(error);
    }

    pub(crate) fn clear_research(&mut self) {
        self.research_findings = None;
    }
}
