use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use tracing::info;

use notiscore::config::Config;
use notiscore::output::record::CheckRecord;
use notiscore::output::terminal;
use notiscore::preferences::{PreferenceSource, SharedPreferences};
use notiscore::scoring::{OpenAiScorer, ScoringClient};

/// notiscore: score notifications with a chat model and decide what to filter.
///
/// Each notification's title and body are rated 0-10 by an OpenAI-compatible
/// endpoint. Scores at or below the filtering degree are filtered.
#[derive(Parser)]
#[command(name = "notiscore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single notification
    Score {
        /// Notification title
        #[arg(long)]
        title: Option<String>,

        /// Notification body
        #[arg(long)]
        content: Option<String>,
    },

    /// Score every notification in a JSON file, in order
    Batch {
        /// JSON array of {"title": ..., "content": ...} objects
        file: PathBuf,

        /// Print one JSON record per line instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check that an endpoint returns a usable score (settings are not saved)
    TestConnection {
        /// Endpoint URL (default: NOTISCORE_API_URL)
        #[arg(long)]
        url: Option<String>,

        /// API key (default: NOTISCORE_API_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Model name (default: NOTISCORE_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// System prompt (default: NOTISCORE_PROMPT, then the built-in prompt)
        #[arg(long)]
        prompt: Option<String>,

        /// Sampling temperature (default: NOTISCORE_TEMPERATURE)
        #[arg(long)]
        temperature: Option<f32>,
    },

    /// Show the effective configuration
    Status,
}

/// One entry of a batch file. Missing fields are scored as empty.
#[derive(Deserialize)]
struct BatchItem {
    title: Option<String>,
    content: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("notiscore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { title, content } => {
            let config = Config::load()?;
            config.require_api()?;
            let (client, preferences) = build_client(config)?;

            let verdict = client
                .submit(title.as_deref(), content.as_deref())
                .await?;
            let record =
                CheckRecord::new(title.as_deref(), &verdict, preferences.filtering_degree());
            terminal::display_check(None, &record);
        }

        Commands::Batch { file, json } => {
            let config = Config::load()?;
            config.require_api()?;

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let items: Vec<BatchItem> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of notifications", file.display()))?;

            info!(count = items.len(), "Scoring batch");
            let (client, preferences) = build_client(config)?;

            // Everything is queued up front; the worker still runs one at a time
            let handles: Vec<_> = items
                .iter()
                .map(|item| client.submit(item.title.as_deref(), item.content.as_deref()))
                .collect();
            let verdicts = futures::future::join_all(handles).await;

            let mut records = Vec::with_capacity(items.len());
            for (item, verdict) in items.iter().zip(verdicts) {
                let verdict = verdict?;
                records.push(CheckRecord::new(
                    item.title.as_deref(),
                    &verdict,
                    preferences.filtering_degree(),
                ));
            }

            if json {
                for record in &records {
                    println!("{}", serde_json::to_string(record)?);
                }
            } else {
                terminal::display_checks(&records);
            }
        }

        Commands::TestConnection {
            url,
            key,
            model,
            prompt,
            temperature,
        } => {
            let config = Config::load()?;
            let api_url = url.unwrap_or_else(|| config.api_url.clone());
            let api_key = key.unwrap_or_else(|| config.api_key.clone());
            let model_name = model.unwrap_or_else(|| config.model_name.clone());
            let system_prompt = prompt.unwrap_or_else(|| config.model_prompt.clone());
            let temperature = temperature.unwrap_or(config.temperature);

            let (client, _) = build_client(config)?;
            println!("Testing connection...");
            let ok = client
                .test_connection(&api_url, &api_key, &model_name, &system_prompt, temperature)
                .await;
            terminal::display_connection_test(&api_url, ok);

            if !ok {
                anyhow::bail!("Connection test failed");
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            println!("{}", "=== notiscore settings ===".bold());
            notiscore::status::show(&config);
        }
    }

    Ok(())
}

/// Wire the HTTP scorer, the settings store and the client together.
fn build_client(config: Config) -> Result<(ScoringClient, Arc<SharedPreferences>)> {
    let scorer = OpenAiScorer::new().context("Failed to build HTTP client")?;
    let preferences = Arc::new(SharedPreferences::new(config));
    let client = ScoringClient::new(Arc::new(scorer), preferences.clone());
    Ok((client, preferences))
}
