use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the raw input file after positional fields have been
/// assigned their canonical names. No value transformation has happened yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub sentiment_code: i64,
    pub id: String,
    pub date: String,
    pub query: String,
    pub user: String,
    pub text: String,
}

/// Human-readable polarity derived from the dataset's numeric sentiment code.
///
/// `Unknown` is a sentinel for codes outside {0, 2, 4}. It is not a fourth
/// valid sentiment; consumers must treat it as "unmapped".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
    Unknown,
}

impl SentimentLabel {
    /// Total mapping from the dataset's sentiment codes.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => SentimentLabel::Negative,
            2 => SentimentLabel::Neutral,
            4 => SentimentLabel::Positive,
            _ => SentimentLabel::Unknown,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Negative" => SentimentLabel::Negative,
            "Neutral" => SentimentLabel::Neutral,
            "Positive" => SentimentLabel::Positive,
            _ => SentimentLabel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully enriched post ready for persistence. Matches the destination
/// table schema column for column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Original numeric sentiment code, retained for downstream audits
    pub sentiment_code: i64,
    pub id: String,
    /// Kept as the original locale-formatted string, e.g.
    /// "Mon Apr 06 22:19:45 PDT 2009". Parsing is the reading side's job.
    pub date: String,
    pub query: String,
    pub user: String,
    pub text: String,
    pub sentiment_label: SentimentLabel,
    /// Comma-joined lowercase hashtags in order of occurrence, duplicates
    /// kept. Empty string when the post has none.
    pub hashtags: String,
}
