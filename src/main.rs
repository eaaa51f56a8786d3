use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scribe::agent::{ResearchService, WritingService};
use scribe::cli::{parse_tags, prompt_request};
use scribe::config::{AppConfig, API_KEY_ENV};
use scribe::fetch::HttpFetcher;
use scribe::llm::{OpenAiClient, TextGenerator};
use scribe::shutdown::wait_for_shutdown;
use scribe::workflow::{ArticleRequest, ArticleWorkflow};

#[derive(Parser)]
#[command(
    name = "scribe",
    about = "Generate articles using AI-powered research and writing agents"
)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Research, write and save a new article
    Generate(GenerateArgs),
    /// Revise an existing article according to notes
    Revise(ReviseArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// The topic for the article
    #[arg(short, long, required_unless_present = "interactive")]
    topic: Option<String>,

    /// Optional URL to research for article content
    #[arg(short, long)]
    url: Option<String>,

    /// Article category (defaults to the configured category)
    #[arg(short, long)]
    category: Option<String>,

    /// Comma-separated list of tags (e.g. "s-corp,tax-planning,deductions")
    #[arg(long)]
    tags: Option<String>,

    /// Additional requirements or constraints for the article
    #[arg(short, long, default_value = "")]
    requirements: String,

    /// Custom output filename (e.g. "my-article.mdx"); derived from the topic otherwise
    #[arg(short, long)]
    filename: Option<String>,

    /// Prompt for each field instead of reading flags
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Args)]
struct ReviseArgs {
    /// Article file to revise
    #[arg(short, long)]
    input: PathBuf,

    /// What to change
    #[arg(short, long)]
    notes: String,

    /// Where to write the revision (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GenerateArgs {
    fn into_request(self, default_category: &str) -> anyhow::Result<ArticleRequest> {
        if self.interactive {
            let stdin = std::io::stdin();
            let request = prompt_request(&mut stdin.lock(), &mut std::io::stdout(), default_category)?;
            return Ok(request);
        }

        let topic = self
            .topic
            .ok_or_else(|| anyhow::anyhow!("--topic is required"))?;

        let mut request = ArticleRequest::new(topic)
            .with_category(self.category.unwrap_or_else(|| default_category.to_string()))
            .with_tags(self.tags.as_deref().map(parse_tags).unwrap_or_default())
            .with_requirements(self.requirements);

        if let Some(url) = self.url {
            request = request.with_research_url(url);
        }
        if let Some(filename) = self.filename {
            request = request.with_output_filename(filename);
        }

        Ok(request)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let Some(api_key) = config.api_key() else {
        eprintln!("Error: {API_KEY_ENV} not found in environment variables");
        eprintln!("\nSet your API key in one of:");
        eprintln!("  - the {API_KEY_ENV} environment variable");
        eprintln!("  - a .env file in the working directory");
        eprintln!("  - llm.api_key in scribe.toml");
        return Ok(ExitCode::FAILURE);
    };

    tracing::info!(model = %config.llm.model, "Using generative backend");

    let llm: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::new(
        &api_key,
        &config.llm.base_url,
        &config.llm.model,
    ));
    let writing = WritingService::new(
        Arc::clone(&llm),
        &config.article.author,
        config.llm.writing_temperature,
    );

    match cli.command {
        Command::Generate(args) => generate(&config, llm, writing, args).await,
        Command::Revise(args) => revise(&writing, args).await,
    }
}

async fn generate(
    config: &AppConfig,
    llm: Arc<dyn TextGenerator>,
    writing: WritingService,
    args: GenerateArgs,
) -> anyhow::Result<ExitCode> {
    let request = match args.into_request(&config.article.default_category) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let research = ResearchService::new(
        llm,
        Arc::new(HttpFetcher::new(&config.fetcher)),
        &config.article.author,
        config.llm.research_temperature,
        config.fetcher.max_source_chars,
    );
    let workflow = ArticleWorkflow::new(research, writing, &config.output);

    let state = tokio::select! {
        result = workflow.run(request) => result?,
        _ = wait_for_shutdown() => {
            eprintln!("\nArticle generation cancelled by user");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(error) = state.error() {
        eprintln!("\nArticle generation failed: {error}");
        return Ok(ExitCode::FAILURE);
    }

    let location = workflow
        .output_dir()
        .join(state.output_filename().unwrap_or_default());
    println!("\nSuccess! Your article has been generated.");
    println!("Location: {}", location.display());

    Ok(ExitCode::SUCCESS)
}

async fn revise(writing: &WritingService, args: ReviseArgs) -> anyhow::Result<ExitCode> {
    let article = tokio::fs::read_to_string(&args.input).await?;

    let revised = tokio::select! {
        result = writing.revise_article(&article, &args.notes) => result?,
        _ = wait_for_shutdown() => {
            eprintln!("\nRevision cancelled by user");
            return Ok(ExitCode::FAILURE);
        }
    };

    let destination = args.output.unwrap_or(args.input);
    tokio::fs::write(&destination, revised).await?;

    println!("Revised article written to {}", destination.display());
    Ok(ExitCode::SUCCESS)
}
