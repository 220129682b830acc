//! tweetscore - tweet sentiment scoring
//!
//! Reads tweets, asks the language service for entity and document sentiment,
//! prints one combined record per tweet on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tweetscore_common::config::load_or_default;
use tweetscore_common::logging::init_tracing;
use tweetscore_common::EventBus;

use tweetscore::services::{read_all, JsonLinesSink, LanguageClient, OutputSink, PrettyJsonSink};
use tweetscore::{BatchDriver, Overrides, Settings};

const EVENT_BUS_CAPACITY: usize = 100;

/// Command-line arguments for tweetscore
#[derive(Parser, Debug)]
#[command(name = "tweetscore")]
#[command(about = "Score tweets with entity and document sentiment")]
#[command(version)]
struct Args {
    /// Tweet file: JSON array, {"tweets": [...]}, or JSON Lines (.jsonl/.ndjson)
    #[arg(env = "TWEETSCORE_INPUT")]
    input: Option<PathBuf>,

    /// Language service API key
    #[arg(long, env = "TWEETSCORE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Language service base URL
    #[arg(long, env = "TWEETSCORE_ENDPOINT")]
    endpoint: Option<String>,

    /// Language hint for every tweet (e.g. "en")
    #[arg(long)]
    language: Option<String>,

    /// Maximum tweets awaiting the service at once
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// Print results in input order instead of completion order
    #[arg(long)]
    ordered: bool,

    /// One compact JSON record per line instead of pretty-printed output
    #[arg(long)]
    compact: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Config file (default: <config dir>/tweetscore/config.toml)
    #[arg(short, long, env = "TWEETSCORE_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            input_path: self.input.clone(),
            endpoint: self.endpoint.clone(),
            language: self.language.clone(),
            max_in_flight: self.max_in_flight,
            ordered: self.ordered,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so [logging] level can apply
    let loaded = load_or_default(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&loaded.config.logging.level)?;

    info!("Starting tweetscore v{}", env!("CARGO_PKG_VERSION"));
    loaded.log_source();

    let settings = Settings::resolve(args.overrides(), &loaded.config)?;
    info!(
        input = %settings.input_path.display(),
        endpoint = %settings.client.endpoint,
        max_in_flight = settings.batch.max_in_flight,
        order = ?settings.batch.order,
        "Configuration resolved"
    );

    let tweets = read_all(&settings.input_path).context("Failed to load tweets")?;

    let client = Arc::new(LanguageClient::new(settings.client)?);
    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
    let driver = BatchDriver::new(client, settings.batch, event_bus);

    let stdout = std::io::stdout();
    let mut sink: Box<dyn OutputSink> = if args.compact {
        Box::new(JsonLinesSink::new(stdout))
    } else {
        Box::new(PrettyJsonSink::new(stdout))
    };

    let summary = driver
        .run(tweets, &mut sink)
        .await
        .context("Failed to write results")?;

    if summary.failed > 0 {
        bail!("{} of {} tweets failed", summary.failed, summary.total);
    }

    Ok(())
}
