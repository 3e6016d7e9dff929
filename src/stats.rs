//! Read-side aggregates over the destination table.
//!
//! These are the same queries the dashboard runs against the `posts` table:
//! sentiment counts, monthly volume, top hashtags, and substring search.
//! Everything here is read-only; the store is never written back to.

use crate::constants;
use crate::types::{Post, SentimentLabel};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};

/// Per-label counts over a set of posts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub unknown: usize,
}

impl SentimentCounts {
    pub fn tally<'a, I: IntoIterator<Item = &'a Post>>(posts: I) -> Self {
        let mut counts = Self::default();
        for post in posts {
            match post.sentiment_label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative + self.unknown
    }

    /// Percentage of positive posts, 0.0 when the set is empty.
    pub fn positive_pct(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.positive as f64 / self.total() as f64 * 100.0
        }
    }
}

/// Parse the dataset's locale-formatted date string, e.g.
/// "Mon Apr 06 22:19:45 PDT 2009". The timezone abbreviation carries no
/// parseable offset, so it is dropped and the rest read as a naive local
/// timestamp. Unparseable dates yield `None`; those rows are dateless and
/// simply excluded from time series, never treated as errors.
pub fn parse_post_date(date: &str) -> Option<NaiveDateTime> {
    let tokens: Vec<&str> = date.split_whitespace().collect();
    if tokens.len() != 6 {
        return None;
    }
    let without_tz = format!(
        "{} {} {} {} {}",
        tokens[0], tokens[1], tokens[2], tokens[3], tokens[5]
    );
    NaiveDateTime::parse_from_str(&without_tz, "%a %b %d %H:%M:%S %Y").ok()
}

/// Monthly post volume, keyed "YYYY-MM" in ascending order, truncated to
/// the first 12 months like the dashboard's posts-over-time chart.
pub fn monthly_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for post in posts {
        if let Some(date) = parse_post_date(&post.date) {
            *by_month.entry(date.format("%Y-%m").to_string()).or_default() += 1;
        }
    }
    by_month
        .into_iter()
        .take(constants::MONTHLY_SERIES_LIMIT)
        .collect()
}

/// Top-N hashtags by frequency after splitting the comma-joined column and
/// flattening. Ties break alphabetically so the output is stable.
pub fn top_hashtags(posts: &[Post], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in post.hashtags.split(',').filter(|t| !t.is_empty()) {
            *counts.entry(tag).or_default() += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Posts whose text contains any keyword from the free-text query.
/// Words of 3 characters or fewer are dropped and matching is a plain
/// case-insensitive substring test, exactly the dashboard's search.
pub fn keyword_matches<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let keywords: Vec<String> = query
        .split_whitespace()
        .filter(|w| w.len() >= constants::MIN_KEYWORD_LEN)
        .map(|w| w.to_lowercase())
        .collect();
    if keywords.is_empty() {
        return Vec::new();
    }
    posts
        .iter()
        .filter(|p| {
            let text = p.text.to_lowercase();
            keywords.iter().any(|k| text.contains(k))
        })
        .collect()
}

/// Posts mentioning a hashtag, by substring match against the comma-joined
/// column (so "#new" also matches "#newphone", as in the dashboard).
pub fn hashtag_matches<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    let needle = tag.to_lowercase();
    posts.iter().filter(|p| p.hashtags.contains(&needle)).collect()
}

/// Canned insight line for a keyword search. Templated text, not inference;
/// the wording is part of the output contract.
pub fn keyword_insight(query: &str, counts: &SentimentCounts) -> String {
    format!(
        "{} shows {:.1}% positive sentiment. Key themes: price, performance, reliability.",
        title_case(query),
        counts.positive_pct()
    )
}

/// Canned insight line for a hashtag drill-down. Same contract as above.
pub fn hashtag_insight(tag: &str, counts: &SentimentCounts) -> String {
    format!(
        "Discussion around {} shows {:.1}% positive sentiment, indicating strong engagement.",
        tag,
        counts.positive_pct()
    )
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
