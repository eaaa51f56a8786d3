use std::path::{Path, PathBuf};

use crate::agent::{ArticleBrief, ResearchService, WritingService};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::workflow::save;
use crate::workflow::state::{ArticleRequest, WorkflowState};

pub const URL_FALLBACK_MESSAGE: &str = "URL research failed, used topic research instead";
pub const TOPIC_RESEARCH_MESSAGE: &str = "Research completed from topic knowledge";
pub const ARTICLE_WRITTEN_MESSAGE: &str = "Article written successfully";

const PREVIEW_CHARS: usize = 500;

/// Runs research, write and save in that fixed order for one article.
///
/// Stage failures are recorded in the returned state instead of being raised.
/// The save stage is the only one that checks for an earlier error.
pub struct ArticleWorkflow {
    research: ResearchService,
    writing: WritingService,
    output_dir: PathBuf,
    extension: String,
}

impl ArticleWorkflow {
    pub fn new(research: ResearchService, writing: WritingService, output: &OutputConfig) -> Self {
        Self {
            research,
            writing,
            output_dir: output.dir.clone(),
            extension: output.extension.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Drive a new state through every stage.
    ///
    /// Only invalid inputs produce an `Err`; everything else ends up in
    /// `WorkflowState::error`.
    pub async fn run(&self, request: ArticleRequest) -> Result<WorkflowState> {
        let mut state = WorkflowState::new(request)?;

        tracing::info!(
            topic = %state.topic(),
            research_url = ?state.inputs().research_url,
            category = %state.inputs().category,
            tags = ?state.inputs().tags,
            "Starting article workflow"
        );

        self.research_stage(&mut state).await;
        self.write_stage(&mut state).await;
        self.save_stage(&mut state).await;

        match state.error() {
            Some(error) => tracing::error!(error = %error, "Workflow completed with errors"),
            None => tracing::info!(
                output_filename = ?state.output_filename(),
                "Workflow completed successfully"
            ),
        }

        Ok(state)
    }

    async fn research_stage(&self, state: &mut WorkflowState) {
        tracing::info!(stage = "research", "Stage started");

        let outcome = self.gather_research(state.inputs()).await;
        match outcome {
            Ok((findings, message)) => {
                tracing::debug!(preview = %preview(&findings), "Research findings");
                state.record_research(findings, message);
            }
            Err(e) => {
                let error = format!("Research failed: {e}");
                tracing::error!(stage = "research", error = %error, "Stage failed");
                state.record_error(error);
                state.clear_research();
            }
        }
    }

    /// Findings plus the log message describing how they were obtained.
    async fn gather_research(&self, inputs: &ArticleRequest) -> Result<(String, String)> {
        let context = &inputs.additional_requirements;

        let Some(url) = inputs.research_url.as_deref() else {
            let findings = self
                .research
                .research_from_topic(&inputs.topic, context)
                .await?;
            return Ok((findings, TOPIC_RESEARCH_MESSAGE.to_string()));
        };

        if let Some(findings) = self.research.research_from_url(url, &inputs.topic).await? {
            return Ok((findings, format!("Research completed from URL: {url}")));
        }

        tracing::warn!(url = %url, "URL research failed, falling back to topic research");
        let findings = self
            .research
            .research_from_topic(&inputs.topic, context)
            .await?;
        Ok((findings, URL_FALLBACK_MESSAGE.to_string()))
    }

    // Runs even when research recorded an error; it then writes without findings.
    async fn write_stage(&self, state: &mut WorkflowState) {
        tracing::info!(stage = "write", "Stage started");

        let inputs = state.inputs();
        let brief = ArticleBrief {
            topic: &inputs.topic,
            research_findings: state.research_findings(),
            category: &inputs.category,
            tags: &inputs.tags,
            additional_requirements: &inputs.additional_requirements,
        };

        let outcome = self.writing.write_article(&brief).await;
        match outcome {
            Ok(article) => {
                tracing::debug!(preview = %preview(&article), "Article draft");
                state.record_article(article, ARTICLE_WRITTEN_MESSAGE.to_string());
            }
            Err(e) => {
                let error = format!("Writing failed: {e}");
                tracing::error!(stage = "write", error = %error, "Stage failed");
                state.record_error(error);
            }
        }
    }

    async fn save_stage(&self, state: &mut WorkflowState) {
        tracing::info!(stage = "save", "Stage started");

        if let Some(error) = state.error() {
            tracing::warn!(error = %error, "Skipping save due to previous error");
            return;
        }

        let filename = match state.output_filename().map(str::to_string) {
            Some(name) => name,
            None => {
                let derived = save::derive_filename(state.topic(), &self.extension);
                state.set_output_filename(derived.clone());
                derived
            }
        };

        let outcome = save::persist(&self.output_dir, &filename, state.article_content()).await;
        match outcome {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Article saved");
                state.push_message(format!("Article saved to {}", path.display()));
            }
            Err(e) => {
                let error = format!("Save failed: {e}");
                tracing::error!(stage = "save", error = %error, "Stage failed");
                state.record_error(error);
            }
        }
    }
}

fn preview(text: &str) -> String {
    let head = crate::agent::research::truncate_chars(text, PREVIEW_CHARS);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::agent::testing::{FakeFetcher, FakeGenerator};

    struct Harness {
        workflow: ArticleWorkflow,
        llm: Arc<FakeGenerator>,
        dir: tempfile::TempDir,
    }

    fn harness(llm: FakeGenerator, fetcher: FakeFetcher) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(llm);
        let research = ResearchService::new(llm.clone(), Arc::new(fetcher), "Test CPA", 0.3, 10_000);
        let writing = WritingService::new(llm.clone(), "Test CPA", 0.7);
        let output = OutputConfig {
            dir: dir.path().join("content").join("articles"),
            extension: "mdx".to_string(),
        };
        Harness {
            workflow: ArticleWorkflow::new(research, writing, &output),
            llm,
            dir,
        }
    }

    fn ok(text: &str) -> std::result::Result<String, String> {
        Ok(text.to_string())
    }

    fn err(text: &str) -> std::result::Result<String, String> {
        Err(text.to_string())
    }

    #[tokio::test]
    async fn test_topic_only_run_saves_article() {
        let h = harness(
            FakeGenerator::scripted(vec![ok("Findings"), ok("# Article")], err("unexpected")),
            FakeFetcher::failing(),
        );

        let state = h
            .workflow
            .run(ArticleRequest::new("Home Office Deduction"))
            .await
            .unwrap();

        assert!(state.error().is_none());
        assert_eq!(state.output_filename(), Some("home-office-deduction.mdx"));
        assert_eq!(state.research_findings(), Some("Findings"));
        assert_eq!(state.article_content(), "# Article");
        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.messages()[0], TOPIC_RESEARCH_MESSAGE);
        assert_eq!(state.messages()[1], ARTICLE_WRITTEN_MESSAGE);
        assert!(state.messages()[2].starts_with("Article saved to "));
        assert!(!state.messages().iter().any(|m| m == URL_FALLBACK_MESSAGE));

        let written = h.workflow.output_dir().join("home-office-deduction.mdx");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "# Article");
        assert!(h.dir.path().exists());
    }

    #[tokio::test]
    async fn test_punctuated_topic_derives_stripped_filename() {
        let h = harness(FakeGenerator::replying("text"), FakeFetcher::failing());

        let state = h.workflow.run(ArticleRequest::new("S-Corp!!")).await.unwrap();

        assert_eq!(state.output_filename(), Some("s-corp.mdx"));
        assert!(h.workflow.output_dir().join("s-corp.mdx").exists());
    }

    #[tokio::test]
    async fn test_url_research_success() {
        let h = harness(
            FakeGenerator::scripted(vec![ok("Page findings"), ok("Article")], err("unexpected")),
            FakeFetcher::page("IRS Guide", "Body text"),
        );
        let url = "https://www.irs.gov/home-office";

        let state = h
            .workflow
            .run(ArticleRequest::new("Home Office").with_research_url(url))
            .await
            .unwrap();

        assert!(state.is_success());
        assert_eq!(state.research_findings(), Some("Page findings"));
        assert_eq!(
            state.messages()[0],
            format!("Research completed from URL: {url}")
        );
        let requests = h.llm.requests();
        assert!(requests[0].user.contains("Title: IRS Guide"));
        assert!(requests[1].user.contains("Research Findings:\nPage findings"));
    }

    #[tokio::test]
    async fn test_unreachable_url_falls_back_to_topic_research() {
        let h = harness(
            FakeGenerator::scripted(vec![ok("Topic findings"), ok("Article")], err("unexpected")),
            FakeFetcher::failing(),
        );

        let state = h
            .workflow
            .run(ArticleRequest::new("Home Office").with_research_url("https://unreachable.test"))
            .await
            .unwrap();

        assert!(state.is_success());
        assert_eq!(state.research_findings(), Some("Topic findings"));
        assert_eq!(state.messages()[0], URL_FALLBACK_MESSAGE);
        assert_eq!(state.messages().len(), 3);
        // Only the topic research and the article were requested.
        assert_eq!(h.llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_url_takes_topic_only_path() {
        let h = harness(
            FakeGenerator::scripted(vec![ok("Topic findings"), ok("Article")], err("unexpected")),
            FakeFetcher::failing(),
        );

        let state = h
            .workflow
            .run(ArticleRequest::new("Topic").with_research_url(""))
            .await
            .unwrap();

        assert!(state.is_success());
        assert_eq!(state.messages()[0], TOPIC_RESEARCH_MESSAGE);
        assert!(!state.messages().iter().any(|m| m == URL_FALLBACK_MESSAGE));
    }

    #[tokio::test]
    async fn test_fallback_matches_topic_only_findings() {
        let topic_only = harness(FakeGenerator::replying("Same"), FakeFetcher::failing());
        let fallback = harness(FakeGenerator::replying("Same"), FakeFetcher::failing());

        let a = topic_only
            .workflow
            .run(ArticleRequest::new("Payroll Taxes"))
            .await
            .unwrap();
        let b = fallback
            .workflow
            .run(ArticleRequest::new("Payroll Taxes").with_research_url("https://down.test"))
            .await
            .unwrap();

        assert_eq!(a.research_findings(), b.research_findings());
        assert_eq!(
            topic_only.llm.requests()[0].user,
            fallback.llm.requests()[0].user
        );
        assert_eq!(b.messages()[0], URL_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_research_failure_still_runs_writing() {
        let h = harness(
            FakeGenerator::scripted(vec![err("research down")], ok("Article anyway")),
            FakeFetcher::failing(),
        );

        let state = h.workflow.run(ArticleRequest::new("Topic")).await.unwrap();

        assert_eq!(
            state.error(),
            Some("Research failed: LLM API error: research down")
        );
        assert!(state.research_findings().is_none());
        assert_eq!(state.article_content(), "Article anyway");
        assert_eq!(state.messages(), [ARTICLE_WRITTEN_MESSAGE.to_string()]);
        assert!(h.llm.requests()[1].user.contains("No external research provided"));
        // Save was skipped: no filename derived, nothing written.
        assert!(state.output_filename().is_none());
        assert!(!h.workflow.output_dir().exists());
    }

    #[tokio::test]
    async fn test_writing_failure_overwrites_research_error() {
        let h = harness(FakeGenerator::failing("backend down"), FakeFetcher::failing());

        let state = h.workflow.run(ArticleRequest::new("Topic")).await.unwrap();

        assert_eq!(
            state.error(),
            Some("Writing failed: LLM API error: backend down")
        );
        assert!(state.messages().is_empty());
        assert!(state.article_content().is_empty());
    }

    #[tokio::test]
    async fn test_writing_failure_skips_save() {
        let h = harness(
            FakeGenerator::scripted(vec![ok("Findings"), err("timeout")], err("unexpected")),
            FakeFetcher::failing(),
        );

        let state = h
            .workflow
            .run(ArticleRequest::new("Topic").with_output_filename("custom.mdx"))
            .await
            .unwrap();

        assert_eq!(state.error(), Some("Writing failed: LLM API error: timeout"));
        assert_eq!(state.messages(), [TOPIC_RESEARCH_MESSAGE.to_string()]);
        assert!(!h.workflow.output_dir().join("custom.mdx").exists());
    }

    #[tokio::test]
    async fn test_supplied_filename_is_used() {
        let h = harness(FakeGenerator::replying("text"), FakeFetcher::failing());

        let state = h
            .workflow
            .run(ArticleRequest::new("Estimated Tax Payments").with_output_filename("guide.mdx"))
            .await
            .unwrap();

        assert!(state.is_success());
        assert_eq!(state.output_filename(), Some("guide.mdx"));
        assert!(h.workflow.output_dir().join("guide.mdx").exists());
    }

    #[tokio::test]
    async fn test_unsafe_supplied_filename_fails_save() {
        let h = harness(FakeGenerator::replying("text"), FakeFetcher::failing());

        let state = h
            .workflow
            .run(ArticleRequest::new("Topic").with_output_filename("../escape.mdx"))
            .await
            .unwrap();

        let error = state.error().unwrap();
        assert!(error.starts_with("Save failed: "));
        assert_eq!(state.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_topic_propagates() {
        let h = harness(FakeGenerator::replying("text"), FakeFetcher::failing());
        assert!(h.workflow.run(ArticleRequest::new("")).await.is_err());
        assert_eq!(h.llm.call_count(), 0);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(600);
        assert_eq!(preview(&long).len(), 503);
        assert_eq!(preview("short"), "short");
    }
}
