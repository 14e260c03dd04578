#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the disaster dashboard pipeline.

use std::time::Duration;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use disaster_dash_analytics::filter::filter_events;
use disaster_dash_analytics::summary::summarize;
use disaster_dash_analytics_models::{EventFilter, ScoredEvent, TimeWindow};
use disaster_dash_cli_utils::{IndicatifFeedProgress, init_logger};
use disaster_dash_hazard_models::{DisasterType, Region, Severity};
use disaster_dash_ingest::watch::{WatchInput, watch_input};
use disaster_dash_ingest::{Pipeline, PipelineConfig, report};
use disaster_dash_source::registry;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt as _, BufReader};

#[derive(Parser)]
#[command(name = "disaster_dash", about = "Natural disaster monitoring pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args)]
struct PipelineArgs {
    /// Comma-separated list of feed IDs to poll (overrides `DISASTER_DASH_FEEDS` env var)
    #[arg(long, global = true)]
    feeds: Option<String>,
    /// Per-request fetch timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// How long a successful feed fetch is reused, in seconds
    #[arg(long, global = true)]
    cache_ttl_secs: Option<u64>,
    /// Seed for the synthetic fallback data
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl PipelineArgs {
    fn apply(self, mut config: PipelineConfig) -> PipelineConfig {
        if self.feeds.is_some() {
            config.feeds = self.feeds;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.cache_ttl_secs {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Time window: 24h, week, month, year, or all
    #[arg(long, default_value = "all")]
    window: TimeWindow,
    /// Regions to keep (e.g., "North America,Asia"); all when omitted
    #[arg(long = "region", value_delimiter = ',')]
    regions: Vec<Region>,
    /// Disaster types to keep (e.g., "Flood,Wildfire"); all when omitted
    #[arg(long = "type", value_delimiter = ',')]
    disaster_types: Vec<DisasterType>,
    /// Lowest severity to keep
    #[arg(long, default_value = "Low")]
    min_severity: Severity,
    /// Highest severity to keep
    #[arg(long, default_value = "High")]
    max_severity: Severity,
    /// Minimum affected population
    #[arg(long, default_value_t = 0)]
    min_population: u64,
}

impl From<FilterArgs> for EventFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            time_window: args.window,
            regions: args.regions,
            disaster_types: args.disaster_types,
            min_severity: args.min_severity,
            max_severity: args.max_severity,
            min_population: args.min_population,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show scored events
    Events {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show mean risk per region and disaster type
    Risk,
    /// Show affected population and impact per year and disaster type
    Historical {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show headline metrics and critical events
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List all configured feeds
    Feeds,
    /// Re-run the summary periodically. Type `r` + Enter to reload, `q` to quit.
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 300)]
        interval_secs: u64,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = init_logger();
    let cli = Cli::parse();
    let json = cli.json;

    if matches!(cli.command, Commands::Feeds) {
        let feeds = registry::all_feeds();
        if json {
            print_json(&feeds)?;
        } else {
            print!("{}", report::feeds_table(&feeds));
        }
        return Ok(());
    }

    let config = cli.pipeline.apply(PipelineConfig::from_env()?);
    let mut pipeline = Pipeline::new(&config)?
        .with_progress(IndicatifFeedProgress::feeds_bar(&multi, "Fetching feeds"));

    log::info!(
        "Polling {} feed(s): {}",
        pipeline.feed_ids().len(),
        pipeline.feed_ids().join(", ")
    );

    match cli.command {
        Commands::Events { filter } => {
            let events = load_filtered(&mut pipeline, &filter.into()).await?;
            if json {
                print_json(&events)?;
            } else {
                println!("{}", report::events_table(&events));
            }
        }
        Commands::Risk => {
            let factors = pipeline.load_risk_data().await?;
            if json {
                print_json(&factors)?;
            } else {
                print!("{}", report::risk_table(&factors));
            }
        }
        Commands::Historical { filter } => {
            let events = load_filtered(&mut pipeline, &filter.into()).await?;
            let table = pipeline.process_historical_data(&events);
            if json {
                print_json(&table)?;
            } else {
                println!("{}", report::historical_table(&table));
            }
        }
        Commands::Summary { filter } => {
            show_summary(&mut pipeline, &filter.into(), json).await?;
        }
        Commands::Watch {
            interval_secs,
            filter,
        } => {
            watch(
                &mut pipeline,
                &filter.into(),
                Duration::from_secs(interval_secs.max(1)),
                json,
            )
            .await?;
        }
        Commands::Feeds => {}
    }

    Ok(())
}

async fn load_filtered(
    pipeline: &mut Pipeline,
    filter: &EventFilter,
) -> Result<Vec<ScoredEvent>, Box<dyn std::error::Error>> {
    let events = pipeline.load_disaster_data().await?;
    Ok(filter_events(filter, &events, Utc::now()))
}

async fn show_summary(
    pipeline: &mut Pipeline,
    filter: &EventFilter,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_filtered(pipeline, filter).await?;
    let summary = summarize(&events);
    if json {
        print_json(&summary)?;
    } else {
        print!("{}", report::summary_text(&summary));
    }
    Ok(())
}

async fn watch(
    pipeline: &mut Pipeline,
    filter: &EventFilter,
    interval: Duration,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = show_summary(pipeline, filter, json).await {
                    log::error!("Refresh failed: {e}");
                }
            }
            line = lines.next_line(), if stdin_open => match watch_input(line) {
                WatchInput::Reload => {
                    pipeline.reload();
                    ticker.reset_immediately();
                }
                WatchInput::Quit => break,
                WatchInput::Blank => {}
                WatchInput::Unknown(other) => {
                    log::warn!("Unknown command {other:?}, expected `r` or `q`");
                }
                WatchInput::Closed => {
                    log::info!("No longer reading stdin, refreshing every {}s", interval.as_secs());
                    stdin_open = false;
                }
            },
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
