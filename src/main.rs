use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use institution_pipeline::app::IngestUseCase;
use institution_pipeline::config::Config;
use institution_pipeline::domain::InstitutionRecord;
use institution_pipeline::extract::Extractor;
use institution_pipeline::generator::Generator;
use institution_pipeline::infra::NdjsonStorage;
use institution_pipeline::logging;
use institution_pipeline::pipeline::processing::migrate::migrate_batch;
use institution_pipeline::pipeline::ScoreMode;
use institution_pipeline::ranking;
use institution_pipeline::storage::{InMemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "institution_pipeline")]
#[command(about = "Normalize, score and store educational-institution records")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write synthetic raw institution records as a JSON array
    Generate {
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Rewrite legacy eligibility mappings in a JSON array file as pairs
    Migrate { input: PathBuf, output: PathBuf },
    /// Dedupe, normalize and store a JSON array of raw records
    Ingest {
        input: PathBuf,
        /// Document file to append to (overrides config and INSTITUTION_STORE)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Normalize and report without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Score division mode (overrides config)
        #[arg(long, value_enum)]
        division: Option<ScoreMode>,
    },
    /// Pull raw field text out of a saved institution page
    Extract {
        html: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List stored institutions by score
    Rank {
        #[arg(long)]
        store: Option<PathBuf>,
        /// Free-text search over name, type, recruiters, exams, city, state and courses
        #[arg(long)]
        query: Option<String>,
        /// Course name filter
        #[arg(long)]
        course: Option<String>,
        /// Discipline filter; lists every matching college instead of a top list
        #[arg(long)]
        branch: Option<String>,
        /// Maximum entries (top list defaults to 4, branch listing is unlimited)
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn read_json_array(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not a JSON array of records", path.display()))
}

fn write_json(value: &impl serde::Serialize, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("💾 Saved to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn run_ingest(
    config: &Config,
    input: &Path,
    store: Option<PathBuf>,
    dry_run: bool,
    division: Option<ScoreMode>,
) -> Result<()> {
    let raws = read_json_array(input)?;
    let mut normalize_config = config.normalize_config();
    if let Some(division) = division {
        normalize_config.score_mode = division;
    }

    let storage: Arc<dyn Storage> = if dry_run {
        println!("🧪 Dry run: records are kept in memory only");
        Arc::new(InMemoryStorage::new())
    } else {
        let path = store.unwrap_or_else(|| config.storage.path.clone());
        Arc::new(NdjsonStorage::new(path)?)
    };

    info!(records = raws.len(), input = %input.display(), "Starting ingestion");
    let use_case = IngestUseCase::with_default_normalizer(normalize_config, storage);
    let report = use_case.process_batch(&raws).await;

    println!("\n📊 Ingestion Results for {}:", input.display());
    println!("   Total records: {}", report.total_records);
    println!("   Stored: {}", report.stored_count());
    println!("   Duplicates skipped: {}", report.duplicates.len());
    println!("   Failed: {}", report.failures.len());

    if !report.duplicates.is_empty() {
        println!("\n🔁 Duplicates:");
        for duplicate in &report.duplicates {
            println!("   - #{} {}", duplicate.index, duplicate.name);
        }
    }
    if !report.failures.is_empty() {
        warn!("{} records were not stored", report.failures.len());
        println!("\n⚠️  Failures:");
        for failure in &report.failures {
            println!("   - #{} {}: {}", failure.index, failure.identifier, failure.error);
        }
    }
    Ok(())
}

async fn run_rank(
    config: &Config,
    store: Option<PathBuf>,
    query: Option<String>,
    course: Option<String>,
    branch: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let path = store.unwrap_or_else(|| config.storage.path.clone());
    let storage = NdjsonStorage::new(&path)?;
    let records: Vec<InstitutionRecord> = storage.list().await?.into_iter().map(|doc| doc.record).collect();

    let ranked = ranking::rank(&records, query.as_deref(), course.as_deref(), branch.as_deref(), limit);

    println!("🏆 {} of {} institutions from {}", ranked.len(), records.len(), path.display());
    for (position, record) in ranked.iter().enumerate() {
        println!(
            "   {}. {} ({}, {}) score {}",
            position + 1,
            record.name,
            record.location.city,
            record.kind,
            record.score
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { count, seed, out } => {
            // stdout carries the records themselves when no file is given
            if out.is_some() {
                println!("🎲 Generating {count} institution records...");
            }
            let records = Generator::new(seed).generate_batch(count);
            write_json(&records, out.as_deref())?;
        }
        Commands::Migrate { input, output } => {
            println!("🔧 Migrating eligibility criteria in {}...", input.display());
            let mut documents = read_json_array(&input)?;
            let report = migrate_batch(&mut documents);
            write_json(&documents, Some(&output))?;

            println!("   Converted: {}", report.converted);
            println!("   Untouched: {}", report.untouched);
            if !report.failures.is_empty() {
                println!("\n⚠️  Left unconverted:");
                for (index, error) in &report.failures {
                    println!("   - #{index}: {error}");
                }
            }
        }
        Commands::Ingest {
            input,
            store,
            dry_run,
            division,
        } => {
            run_ingest(&config, &input, store, dry_run, division).await?;
        }
        Commands::Extract { html, out } => {
            let page = fs::read_to_string(&html).with_context(|| format!("Failed to read {}", html.display()))?;
            let extractor = Extractor::new(&config.extract)?;
            let scraped = extractor.extract(&page);
            let missing = scraped.missing_fields();
            if !missing.is_empty() {
                warn!(?missing, "Some fields were not found on the page");
            }
            write_json(&scraped, out.as_deref())?;
        }
        Commands::Rank {
            store,
            query,
            course,
            branch,
            limit,
        } => {
            run_rank(&config, store, query, course, branch, limit).await?;
        }
    }

    Ok(())
}
