use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use prompts::actions::{
    CAPTIONS_FAILED_MESSAGE, GENERATE_CAPTIONS_PATH, POST_FAILED_MESSAGE, SUGGEST_POST_PATH,
};
use prompts::flows::MAX_NUM_PROMPTS;
use prompts::history::{FileHistoryStore, HistoryItem, HistoryKind, RecentQueries};
use prompts::{ActionResult, CaptionForm, FormErrors, PostForm};
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no data directory; pass --history-file or set CAPTIONCRAFT_HISTORY_FILE")]
    NoHistoryPath,
    #[error("{0}")]
    Invalid(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Action(String),
    #[error("no history entry at position {0}")]
    UnknownEntry(usize),
    #[error("replaying a post entry needs --preferences")]
    MissingPreferences,
}

impl From<FormErrors> for CliError {
    fn from(errors: FormErrors) -> Self {
        let message = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("\n");
        Self::Invalid(message)
    }
}

#[derive(Parser, Debug)]
#[command(name = "captioncraft", about = "Generate caption and post prompts from the terminal")]
struct Cli {
    #[arg(long, env = "CAPTIONCRAFT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "CAPTIONCRAFT_HISTORY_FILE")]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Generate caption prompts for a topic.
    Caption(CaptionArgs),
    /// Suggest a post prompt for a category.
    Post(PostArgs),
    /// Inspect or replay recent queries.
    History(HistoryCommand),
}

#[derive(Args, Debug, Clone)]
struct CaptionArgs {
    #[arg(long)]
    topic: String,

    #[arg(long, default_value = "engaging")]
    tone: String,

    #[arg(long, default_value = "short")]
    length: String,

    #[arg(long, default_value = "creative")]
    style: String,

    #[arg(long, default_value = "instagram")]
    platform: String,

    #[arg(long, default_value_t = prompts::forms::CAPTION_FORM_NUM_PROMPTS,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_NUM_PROMPTS)))]
    count: u32,
}

#[derive(Args, Debug, Clone)]
struct PostArgs {
    #[arg(long)]
    category: String,

    #[arg(long)]
    preferences: String,
}

#[derive(Args, Debug)]
struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Subcommand, Debug)]
enum HistorySubcommand {
    List,
    Clear,
    /// Re-run an entry; positions start at 1 as printed by `list`.
    Replay {
        index: usize,
        #[arg(long)]
        preferences: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    client: reqwest::Client,
}

impl CliContext {
    fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::new(cli.base_url);

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Caption(args) => {
            let mut history = open_history(cli.history_file)?;
            let prompts = run_caption(&ctx, &mut history, &args).await?;
            print_numbered(&prompts);
            Ok(())
        }
        Command::Post(args) => {
            let mut history = open_history(cli.history_file)?;
            let prompt = run_post(&ctx, &mut history, &args).await?;
            println!("{prompt}");
            Ok(())
        }
        Command::History(history_cmd) => {
            let mut history = open_history(cli.history_file)?;
            match history_cmd.command {
                HistorySubcommand::List => {
                    print!("{}", render_history(history.items()));
                    Ok(())
                }
                HistorySubcommand::Clear => {
                    history.clear();
                    println!("history cleared");
                    Ok(())
                }
                HistorySubcommand::Replay { index, preferences } => {
                    match replay(&ctx, &mut history, index, preferences).await? {
                        Replayed::Captions(prompts) => print_numbered(&prompts),
                        Replayed::Post(prompt) => println!("{prompt}"),
                    }
                    Ok(())
                }
            }
        }
    }
}

fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("captioncraft").join("history.json"))
}

fn open_history(path: Option<PathBuf>) -> Result<RecentQueries, CliError> {
    let path = path.or_else(default_history_path).ok_or(CliError::NoHistoryPath)?;
    debug!(path = %path.display(), "cli: opening history");
    Ok(RecentQueries::open(Arc::new(FileHistoryStore::new(path))))
}

// =============================================================================
// ACTIONS
// =============================================================================

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let response = ctx.client.get(ctx.url("/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16() });
    }
    println!("ok");
    Ok(())
}

/// Validate, record in history, then ask the server for caption prompts.
async fn run_caption(
    ctx: &CliContext,
    history: &mut RecentQueries,
    args: &CaptionArgs,
) -> Result<Vec<String>, CliError> {
    let form = CaptionForm {
        topic: args.topic.clone(),
        tone: args.tone.clone(),
        length: args.length.clone(),
        style: args.style.clone(),
        platform: args.platform.clone(),
    };
    let mut request = form.validate()?;
    request.num_prompts = args.count;

    history.add(HistoryKind::Caption, request.topic.clone(), OffsetDateTime::now_utc());
    info!(topic = %request.topic, count = request.num_prompts, "cli: generating captions");

    post_action::<_, Vec<String>>(ctx, GENERATE_CAPTIONS_PATH, &request)
        .await?
        .into_result(CAPTIONS_FAILED_MESSAGE)
        .map_err(CliError::Action)
}

/// Validate, record in history, then ask the server for a post prompt.
async fn run_post(ctx: &CliContext, history: &mut RecentQueries, args: &PostArgs) -> Result<String, CliError> {
    let form = PostForm { category: args.category.clone(), preferences: args.preferences.clone() };
    let request = form.validate()?;

    history.add(HistoryKind::Post, request.category.clone(), OffsetDateTime::now_utc());
    info!(category = %request.category, "cli: suggesting post");

    post_action::<_, String>(ctx, SUGGEST_POST_PATH, &request)
        .await?
        .into_result(POST_FAILED_MESSAGE)
        .map_err(CliError::Action)
}

#[derive(Debug, PartialEq, Eq)]
enum Replayed {
    Captions(Vec<String>),
    Post(String),
}

/// Re-run the entry at 1-based `index` with default options.
async fn replay(
    ctx: &CliContext,
    history: &mut RecentQueries,
    index: usize,
    preferences: Option<String>,
) -> Result<Replayed, CliError> {
    let item = index
        .checked_sub(1)
        .and_then(|i| history.items().get(i))
        .cloned()
        .ok_or(CliError::UnknownEntry(index))?;

    match item.kind {
        HistoryKind::Caption => {
            let args = CaptionArgs {
                topic: item.query,
                tone: "engaging".to_owned(),
                length: "short".to_owned(),
                style: "creative".to_owned(),
                platform: "instagram".to_owned(),
                count: prompts::forms::CAPTION_FORM_NUM_PROMPTS,
            };
            run_caption(ctx, history, &args).await.map(Replayed::Captions)
        }
        HistoryKind::Post => {
            let preferences = preferences.ok_or(CliError::MissingPreferences)?;
            let args = PostArgs { category: item.query, preferences };
            run_post(ctx, history, &args).await.map(Replayed::Post)
        }
    }
}

async fn post_action<B, T>(ctx: &CliContext, path: &str, body: &B) -> Result<ActionResult<T>, CliError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned + Default,
{
    let response = ctx.client.post(ctx.url(path)).json(body).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16() });
    }
    Ok(response.json::<ActionResult<T>>().await?)
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_numbered(items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        println!("{}. {item}", i + 1);
    }
}

fn render_history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return "No history yet.\n".to_owned();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{:>2}  {:<7}  {}\n", i + 1, item.kind.as_str(), item.query))
        .collect()
}
