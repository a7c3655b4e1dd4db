//! `SQLite` storage for collected posts.
//!
//! One table, fixed schema, append-only. Table creation is idempotent and
//! there is no migration or schema check; every insert commits on its own so
//! rows written before a failure survive it.

use chrono::Utc;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::model::{CollectedPost, ScoredPost, StoreStats};

/// `SQLite` storage manager
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;

        // Set pragmas for performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        let storage = Self { conn };
        storage.create_schema()?;
        info!(path = %db_path.as_ref().display(), "database opened");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be initialized.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.create_schema()?;
        Ok(storage)
    }

    /// Get a reference to the underlying database connection.
    ///
    /// This is useful for modules that need to execute custom queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS tweets (
                tweet_id INTEGER NOT NULL,
                tweet_text TEXT NOT NULL,
                created_at TEXT NOT NULL,
                location TEXT NOT NULL,
                geo_coordinates TEXT NOT NULL,
                no_of_followers INTEGER NOT NULL,
                no_of_friends INTEGER NOT NULL,
                sentiment REAL NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Append one scored post as a row.
    ///
    /// The connection runs in autocommit mode, so each insert is committed
    /// on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_post(&self, scored: &ScoredPost) -> Result<()> {
        let p = &scored.post;
        self.conn.execute(
            "INSERT INTO tweets VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                p.tweet_id,
                p.tweet_text,
                p.created_at,
                p.location,
                p.geo_coordinates,
                p.no_of_followers,
                p.no_of_friends,
                scored.sentiment,
            ],
        )?;
        Ok(())
    }

    /// Number of stored rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM tweets", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Aggregate statistics over the stored rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn stats(&self) -> Result<StoreStats> {
        self.conn.query_row(
            r"
            SELECT COUNT(*),
                   AVG(sentiment),
                   MIN(sentiment),
                   MAX(sentiment),
                   COALESCE(SUM(sentiment > 0), 0),
                   COALESCE(SUM(sentiment < 0), 0),
                   COALESCE(SUM(sentiment = 0), 0)
            FROM tweets
            ",
            [],
            |row| {
                Ok(StoreStats {
                    rows: row.get(0)?,
                    avg_sentiment: row.get(1)?,
                    min_sentiment: row.get(2)?,
                    max_sentiment: row.get(3)?,
                    positive: row.get(4)?,
                    negative: row.get(5)?,
                    neutral: row.get(6)?,
                    generated_at: Utc::now(),
                })
            },
        )
        .map_err(Into::into)
    }

    /// Fetch all stored rows in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<ScoredPost>> {
        let sql = limit.map_or_else(
            || "SELECT * FROM tweets ORDER BY rowid".to_string(),
            |n| format!("SELECT * FROM tweets ORDER BY rowid LIMIT {n}"),
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ScoredPost {
                post: CollectedPost {
                    tweet_id: row.get(0)?,
                    tweet_text: row.get(1)?,
                    created_at: row.get(2)?,
                    location: row.get(3)?,
                    geo_coordinates: row.get(4)?,
                    no_of_followers: row.get(5)?,
                    no_of_friends: row.get(6)?,
                },
                sentiment: row.get(7)?,
            })
        })?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }
}
