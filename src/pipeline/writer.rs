use crate::error::{IngestError, Result};
use crate::types::{Post, SentimentLabel};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

/// Writes sampled posts into a named SQLite table, replacing whatever table
/// of that name existed before.
///
/// The replacement is atomic from a reader's perspective: rows land in a
/// staging table first, and the drop-and-rename swap happens inside the same
/// transaction as the inserts. A reader either sees the previous table or
/// the complete new one, never a half-written state.
#[derive(Debug)]
pub struct TableWriter {
    conn: Connection,
    table: String,
}

impl TableWriter {
    pub fn open<P: AsRef<Path>>(db_path: P, table: &str) -> Result<Self> {
        validate_identifier(table)?;
        let conn = Connection::open(db_path)?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Replace the destination table with exactly these posts.
    /// Returns the number of rows written.
    pub fn replace_all(&mut self, posts: &[Post]) -> Result<usize> {
        let table = self.table.clone();
        let staging = format!("{table}_staging");

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            r#"
            DROP TABLE IF EXISTS "{staging}";
            CREATE TABLE "{staging}" (
                sentiment       INTEGER NOT NULL,
                id              TEXT NOT NULL,
                date            TEXT NOT NULL,
                "query"         TEXT NOT NULL,
                user            TEXT NOT NULL,
                text            TEXT NOT NULL,
                sentiment_label TEXT NOT NULL,
                hashtags        TEXT NOT NULL
            );
            "#
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                r#"INSERT INTO "{staging}"
                   (sentiment, id, date, "query", user, text, sentiment_label, hashtags)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#
            ))?;
            for post in posts {
                stmt.execute(params![
                    post.sentiment_code,
                    post.id,
                    post.date,
                    post.query,
                    post.user,
                    post.text,
                    post.sentiment_label.as_str(),
                    post.hashtags,
                ])?;
            }
        }

        tx.execute_batch(&format!(
            r#"
            DROP TABLE IF EXISTS "{table}";
            ALTER TABLE "{staging}" RENAME TO "{table}";
            "#
        ))?;
        tx.commit()?;

        info!(table = %table, rows = posts.len(), "destination table replaced");
        Ok(posts.len())
    }

    /// Read the full table back, the same full-table scan the dashboard
    /// performs at startup.
    pub fn read_all(&self) -> Result<Vec<Post>> {
        let table = &self.table;
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT sentiment, id, date, "query", user, text, sentiment_label, hashtags
               FROM "{table}""#
        ))?;
        let rows = stmt.query_map([], |row| {
            let label: String = row.get(6)?;
            Ok(Post {
                sentiment_code: row.get(0)?,
                id: row.get(1)?,
                date: row.get(2)?,
                query: row.get(3)?,
                user: row.get(4)?,
                text: row.get(5)?,
                sentiment_label: SentimentLabel::from_label(&label),
                hashtags: row.get(7)?,
            })
        })?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        debug!(table = %table, rows = posts.len(), "read destination table");
        Ok(posts)
    }
}

/// Table names are interpolated into SQL, so they are restricted to plain
/// identifiers rather than bound as parameters (SQLite cannot bind them).
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(IngestError::Config(format!(
            "invalid table name '{name}': use letters, digits and underscores"
        )))
    }
}
