use anyhow::Context;
use clap::{Parser, Subcommand};
use company_directory::config::Config;
use company_directory::engine::{ingest, IndexEngine};
use company_directory::host::{self, HostController, QueryOutcome};
use company_directory::store::{DocumentStore, HttpDocumentStore};
use company_directory::upload::UploadService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "company-directory")]
#[command(about = "Company directory search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the directory, interactively or one-shot
    Search {
        /// CSV source (URL or local path); defaults to the configured one
        #[arg(short, long)]
        source: Option<String>,

        /// Load rows from the remote document store instead of a CSV
        #[arg(long)]
        from_store: bool,

        /// One-shot query; without it an interactive prompt is started
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Replace the remote collection with the rows of a CSV file
    Upload {
        /// CSV file to parse and upload
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "company_directory=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        eprintln!("Using default configuration");
        Config::default()
    });

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            source,
            from_store,
            query,
        } => run_search(config, source, from_store, query).await,
        Commands::Upload { file } => run_upload(config, &file).await,
    }
}

async fn run_search(
    config: Config,
    source: Option<String>,
    from_store: bool,
    query: Option<String>,
) -> anyhow::Result<()> {
    let mut host = HostController::new(IndexEngine::new().spawn(), &config.search);

    let count = if from_store {
        let store = HttpDocumentStore::new(
            &config.store.base_url,
            &config.store.collection,
            config.store.timeout_secs,
        )?;
        println!("Loading companies from database...");
        let rows = store.fetch_all().await?;
        host.load_rows(rows).await?
    } else {
        let source = source
            .or(config.source.csv.clone())
            .context("no CSV source given; pass --source or configure [source] csv")?;
        println!("Loading companies from {source}...");
        host.load_csv(&source).await?
    };

    if count == 0 {
        println!("{}", host::render_no_data());
        return Ok(());
    }
    tracing::info!(companies = count, "directory loaded");

    match query {
        Some(query) => {
            print_outcome(&mut host, &query, config.search.min_query_len).await?;
        }
        None => {
            interactive_loop(host, &config).await?;
        }
    }
    Ok(())
}

/// Read queries from stdin, debounced, until EOF.
async fn interactive_loop(mut host: HostController, config: &Config) -> anyhow::Result<()> {
    println!(
        "Type at least {} characters and press Enter (Ctrl-D to quit).",
        config.search.min_query_len
    );

    let (input_tx, input_rx) = mpsc::channel(8);
    let mut queries = host::debounce(config.search.debounce(), input_rx);

    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    while let Some(query) = queries.recv().await {
        print_outcome(&mut host, &query, config.search.min_query_len).await?;
    }
    Ok(())
}

async fn print_outcome(
    host: &mut HostController,
    query: &str,
    min_query_len: usize,
) -> anyhow::Result<()> {
    match host.query(query).await {
        Ok(QueryOutcome::TooShort) => {
            println!("Type at least {min_query_len} characters.");
        }
        Ok(QueryOutcome::NoData) => {
            println!("{}", host::render_no_data());
        }
        Ok(QueryOutcome::Results { query, results }) => {
            println!("{}", host::render_results(&results, &query));
        }
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "query failed");
            println!("Search is unavailable: {e}");
        }
    }
    Ok(())
}

async fn run_upload(config: Config, file: &PathBuf) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let rows = ingest::parse_rows(&text)?;
    if rows.is_empty() {
        anyhow::bail!("CSV file is empty or contains no valid data");
    }
    println!("CSV parsed successfully. Found {} rows.", rows.len());

    let store = Arc::new(HttpDocumentStore::new(
        &config.store.base_url,
        &config.store.collection,
        config.store.timeout_secs,
    )?);
    let uploader = UploadService::new(store).with_batch_size(config.upload.batch_size);

    println!("Clearing old data and uploading...");
    let report = uploader
        .replace_collection(&rows, |progress| {
            println!("Upload progress: {:.0}%", progress * 100.0);
        })
        .await?;

    println!(
        "Data upload complete: {} uploaded, {} skipped, {} old documents cleared.",
        report.uploaded, report.skipped, report.cleared
    );
    Ok(())
}
