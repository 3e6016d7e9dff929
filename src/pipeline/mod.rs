pub mod encoding;
pub mod enrich;
pub mod reader;
pub mod sampler;
pub mod writer;

use crate::config::Config;
use crate::error::Result;
use crate::types::SentimentLabel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument, warn};

use self::writer::TableWriter;

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    /// Rows whose sentiment code fell outside {0, 2, 4} and were recorded
    /// with the Unknown sentinel instead of aborting the run.
    pub rows_unmapped_sentiment: usize,
    pub elapsed_secs: f64,
    pub table: String,
    pub database: String,
    pub finished_at: DateTime<Utc>,
}

pub struct Pipeline;

impl Pipeline {
    /// Run the complete ingestion pipeline:
    /// read → normalize → enrich → sample → replace table.
    ///
    /// One-shot and single-threaded; the whole corpus is materialized in
    /// memory, which bounds dataset size to available RAM. Any fatal error
    /// aborts before the destination table is touched or swapped, so a
    /// failed run never leaves a half-written table behind.
    #[instrument(skip(config), fields(input = %config.input.display(), table = %config.table))]
    pub fn run(config: &Config) -> Result<RunSummary> {
        let started = Instant::now();

        let raw = reader::read_posts(&config.input, config.encoding)?;
        let rows_read = raw.len();
        info!(rows_read, "dataset loaded");

        let enriched: Vec<_> = raw.into_iter().map(enrich::enrich).collect();
        let rows_unmapped_sentiment = enriched
            .iter()
            .filter(|p| p.sentiment_label == SentimentLabel::Unknown)
            .count();
        if rows_unmapped_sentiment > 0 {
            warn!(
                rows = rows_unmapped_sentiment,
                "sentiment codes outside {{0, 2, 4}} recorded as Unknown"
            );
        }

        let sample = sampler::sample_posts(enriched, config.sample_size, config.seed)?;

        let mut writer = TableWriter::open(&config.database, &config.table)?;
        let rows_written = writer.replace_all(&sample)?;

        Ok(RunSummary {
            rows_read,
            rows_written,
            rows_unmapped_sentiment,
            elapsed_secs: started.elapsed().as_secs_f64(),
            table: config.table.clone(),
            database: config.database.display().to_string(),
            finished_at: Utc::now(),
        })
    }
}
