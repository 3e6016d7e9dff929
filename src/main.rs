use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use social_pulse::config::Config;
use social_pulse::constants;
use social_pulse::error::Result;
use social_pulse::logging;
use social_pulse::pipeline::encoding::TextEncoding;
use social_pulse::pipeline::writer::TableWriter;
use social_pulse::pipeline::{Pipeline, RunSummary};
use social_pulse::stats;

#[derive(Parser)]
#[command(name = "social_pulse")]
#[command(about = "Batch sentiment ETL for the social media insight dashboard")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the raw dataset into the destination table
    Ingest {
        /// Path to the raw CSV dataset (headerless, 6 columns)
        #[arg(long)]
        input: Option<PathBuf>,
        /// SQLite database file to write to
        #[arg(long)]
        database: Option<PathBuf>,
        /// Destination table name
        #[arg(long)]
        table: Option<String>,
        /// Number of posts to sample into the table
        #[arg(long)]
        sample_size: Option<usize>,
        /// Text encoding of the input file (latin-1, windows-1252, utf-8)
        #[arg(long)]
        encoding: Option<TextEncoding>,
        /// RNG seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print dashboard-style aggregates over the ingested table
    Stats {
        /// SQLite database file to read from
        #[arg(long)]
        database: Option<PathBuf>,
        /// Table to read
        #[arg(long)]
        table: Option<String>,
        /// How many top hashtags to show
        #[arg(long, default_value_t = constants::DEFAULT_TOP_HASHTAGS)]
        top: usize,
        /// Free-text keyword search over post text
        #[arg(long)]
        query: Option<String>,
        /// Hashtag to drill into (e.g. "#tech")
        #[arg(long)]
        hashtag: Option<String>,
    },
}

fn main() {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            println!("❌ Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Ingest {
            input,
            database,
            table,
            sample_size,
            encoding,
            seed,
            json,
        } => {
            let mut config = config;
            if let Some(input) = input {
                config.input = input;
            }
            if let Some(database) = database {
                config.database = database;
            }
            if let Some(table) = table {
                config.table = table;
            }
            if let Some(sample_size) = sample_size {
                config.sample_size = sample_size;
            }
            if let Some(encoding) = encoding {
                config.encoding = encoding;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            run_ingest(&config, json)
        }
        Commands::Stats {
            database,
            table,
            top,
            query,
            hashtag,
        } => {
            let database = database.unwrap_or(config.database);
            let table = table.unwrap_or(config.table);
            run_stats(&database, &table, top, query.as_deref(), hashtag.as_deref())
        }
    };

    if let Err(e) = outcome {
        error!("Run failed: {}", e);
        println!("❌ {e}");
        std::process::exit(1);
    }
}

fn run_ingest(config: &Config, json: bool) -> Result<()> {
    println!("🔄 Running ingestion pipeline...");
    info!("Starting pipeline");

    let summary = Pipeline::run(config)?;
    info!("Pipeline finished");

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => error!("Failed to render summary as JSON: {}", e),
        }
    } else {
        print_summary(&summary);
    }
    println!("✅ Analyzed {} posts", summary.rows_written);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("\n📊 Ingestion Summary:");
    println!("   Rows read: {}", summary.rows_read);
    println!("   Rows written: {}", summary.rows_written);
    println!(
        "   Unmapped sentiment codes: {}",
        summary.rows_unmapped_sentiment
    );
    println!("   Elapsed: {:.2}s", summary.elapsed_secs);
    println!(
        "   Destination: table '{}' in {}",
        summary.table, summary.database
    );
}

fn run_stats(
    database: &PathBuf,
    table: &str,
    top: usize,
    query: Option<&str>,
    hashtag: Option<&str>,
) -> Result<()> {
    let writer = TableWriter::open(database, table)?;
    let posts = writer.read_all()?;
    let counts = stats::SentimentCounts::tally(&posts);

    println!("\n📊 Overview");
    println!("   Total posts: {}", posts.len());
    println!("   😊 Positive: {}", counts.positive);
    println!("   😐 Neutral: {}", counts.neutral);
    println!("   😢 Negative: {}", counts.negative);
    if counts.unknown > 0 {
        println!("   ❓ Unknown: {}", counts.unknown);
    }

    let monthly = stats::monthly_counts(&posts);
    if !monthly.is_empty() {
        println!("\n📈 Posts Over Time (monthly)");
        for (month, count) in &monthly {
            println!("   {month}: {count}");
        }
    }

    let top_tags = stats::top_hashtags(&posts, top);
    if !top_tags.is_empty() {
        println!("\n🔝 Top Hashtags");
        for (tag, count) in &top_tags {
            println!("   {tag}: {count}");
        }
    }

    if let Some(query) = query {
        let matches = stats::keyword_matches(&posts, query);
        let match_counts =
            stats::SentimentCounts::tally(matches.iter().copied());
        println!("\n🔍 Search: \"{query}\"");
        println!("   Total matching posts: {}", matches.len());
        println!("   🧠 LLM Summary: {}", stats::keyword_insight(query, &match_counts));
    }

    if let Some(tag) = hashtag {
        let mentions = stats::hashtag_matches(&posts, tag);
        let mention_counts =
            stats::SentimentCounts::tally(mentions.iter().copied());
        println!("\n📌 Hashtag: {tag}");
        println!("   Total mentions: {}", mentions.len());
        println!("   🧠 LLM Insight: {}", stats::hashtag_insight(tag, &mention_counts));
    }

    Ok(())
}
