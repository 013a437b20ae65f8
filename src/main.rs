//! cview - browse and filter candidate applications

mod api;
mod controller;
mod display;
mod formatting;
mod logging;
mod models;
mod query;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use api::{CandidateSource, HttpCandidateSource};
use models::{CviewConfig, validate_api_url};
use query::{FilterKey, FilterState, derive_params};

#[derive(Parser)]
#[command(name = "cview")]
#[command(about = "Browse, search and filter candidate applications", long_about = None)]
#[command(version)]
struct Cli {
    /// Candidates endpoint (overrides config and CVIEW_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Write logs to this file (also CVIEW_LOG_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI mode (default)
    #[command(alias = "ui")]
    Tui,

    /// Fetch one page of candidates and print it
    #[command(alias = "ls")]
    List {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Application type (repeatable, e.g. active, archived)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        application_type: Vec<String>,

        /// Candidate source (repeatable, e.g. LinkedIn, GitHub)
        #[arg(long)]
        source: Vec<String>,

        /// Restrict to one job
        #[arg(short, long, value_name = "ID")]
        job: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,

        /// Print the request URL without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = logging::log_file_path(cli.log_file.as_deref());
    logging::init(log_path.as_deref())?;

    let (mut config, config_warnings) = CviewConfig::load()?;
    for warning in &config_warnings {
        tracing::warn!("config: {}", warning);
    }

    if let Some(raw) = cli.api_url.as_deref() {
        let url = validate_api_url(raw)?;
        config.api.base_url = url.to_string();
    }

    let source = HttpCandidateSource::new(config.api.endpoint()?);
    tracing::info!(endpoint = %source.endpoint(), "starting cview");

    match cli.command {
        None | Some(Commands::Tui) => tui::run(source, config, config_warnings)?,
        Some(Commands::List {
            search,
            application_type,
            source: sources,
            job,
            page,
            json,
            dry_run,
        }) => {
            let filters = build_filters(&application_type, &sources, job.as_deref());
            let args = ListArgs {
                search: search.unwrap_or_default(),
                filters,
                page,
                json,
                dry_run,
            };
            let output = handle_list_command(&source, &config, &args)?;
            println!("{}", output);
        }
    }

    Ok(())
}

struct ListArgs {
    search: String,
    filters: FilterState,
    page: u32,
    json: bool,
    dry_run: bool,
}

fn build_filters(application_types: &[String], sources: &[String], job: Option<&str>) -> FilterState {
    let filters = application_types
        .iter()
        .fold(FilterState::default(), |f, v| {
            f.with_value(FilterKey::ApplicationType, v, true)
        });
    let filters = sources
        .iter()
        .fold(filters, |f, v| f.with_value(FilterKey::Source, v, true));
    match job {
        Some(id) => filters.with_job(id, true),
        None => filters,
    }
}

fn handle_list_command(
    source: &HttpCandidateSource,
    config: &CviewConfig,
    args: &ListArgs,
) -> Result<String> {
    let params = derive_params(&args.search, &args.filters, args.page);

    if args.dry_run {
        return Ok(source.request_url(&params).to_string());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let page = rt
        .block_on(source.fetch(&params))
        .with_context(|| format!("request to {} failed", source.endpoint()))?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&page)?);
    }

    let mut output = format!("Query: {}\n", display::format_query_line(&params));
    output.push_str(&display::format_candidates(
        &page,
        args.page.max(1),
        config.display.name_max_length,
        Utc::now(),
    ));
    Ok(output)
}
