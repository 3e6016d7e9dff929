use crate::error::{IngestError, Result};
use crate::pipeline::encoding::TextEncoding;
use crate::types::RawPost;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Number of positional fields in a raw record:
/// sentiment_code, id, date, query, user, text.
const RAW_FIELD_COUNT: usize = 6;

/// Read the whole input file into memory and parse it as headerless CSV.
///
/// The file is decoded from its configured encoding before the CSV parser
/// ever sees it, so field values come out as proper `String`s. Any row that
/// does not decompose into exactly six fields aborts the run; silent row
/// dropping would skew every aggregate the dashboard computes downstream.
pub fn read_posts<P: AsRef<Path>>(path: P, encoding: TextEncoding) -> Result<Vec<RawPost>> {
    let path = path.as_ref();
    info!(path = %path.display(), %encoding, "reading raw dataset");

    let bytes = fs::read(path)?;
    let decoded = encoding.decode(&bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut posts = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index as u64 + 1;
        if record.len() != RAW_FIELD_COUNT {
            return Err(IngestError::MalformedRecord {
                line,
                fields: record.len(),
            });
        }
        posts.push(normalize_record(&record));
    }

    debug!(rows = posts.len(), "finished reading dataset");
    Ok(posts)
}

/// Assign canonical names to the positional fields. Pure relabeling; the
/// only parsing is the sentiment code, where a non-numeric value falls
/// through to a code no label maps to (surfaced later as Unknown rather
/// than failing a whole 500K-row batch over one bad cell).
fn normalize_record(record: &csv::StringRecord) -> RawPost {
    let field = |i: usize| record.get(i).unwrap_or_default().to_string();
    RawPost {
        sentiment_code: record
            .get(0)
            .unwrap_or_default()
            .trim()
            .parse()
            .unwrap_or(-1),
        id: field(1),
        date: field(2),
        query: field(3),
        user: field(4),
        text: field(5),
    }
}
