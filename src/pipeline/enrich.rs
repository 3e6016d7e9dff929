use crate::types::{Post, RawPost, SentimentLabel};
use once_cell::sync::Lazy;
use regex::Regex;

/// `#` followed by word characters, no boundary lookbehind. Mid-word and
/// in-URL hashtags match on purpose; the dashboard's hashtag column was
/// built with the same permissive pattern and consumers expect it.
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());

/// Lower-case the text and collect every hashtag in order of occurrence,
/// duplicates included, joined with commas. No hashtags yields the empty
/// string, never a null; the column must stay string-typed.
pub fn extract_hashtags(text: &str) -> String {
    let lowered = text.to_lowercase();
    HASHTAG
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Derive the sentiment label and hashtag string for a normalized record.
pub fn enrich(raw: RawPost) -> Post {
    let sentiment_label = SentimentLabel::from_code(raw.sentiment_code);
    let hashtags = extract_hashtags(&raw.text);
    Post {
        sentiment_code: raw.sentiment_code,
        id: raw.id,
        date: raw.date,
        query: raw.query,
        user: raw.user,
        text: raw.text,
        sentiment_label,
        hashtags,
    }
}
