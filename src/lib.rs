//! xs - Live X post collection with sentiment scoring
//!
//! This library provides the core functionality for streaming keyword-matched
//! posts from a live feed, scoring their sentiment, and persisting the
//! enriched records to `SQLite`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`clean`] - Post text cleaning
//! - [`config`] - Layered configuration (file, environment, CLI)
//! - [`error`] - Custom error types with rich context
//! - [`model`] - Data models for collected posts
//! - [`sentiment`] - Polarity scoring via the VADER estimator
//! - [`session`] - Collection pipeline orchestration
//! - [`storage`] - `SQLite` storage layer
//! - [`stream`] - Blocking feed client and post iterator

pub mod clean;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod sentiment;
pub mod session;
pub mod storage;
pub mod stream;

pub use cli::*;
pub use clean::clean_text;
pub use error::{Result, XsError};
pub use model::*;
pub use sentiment::SentimentScorer;
pub use session::{SessionReport, collect_posts, run_session, score_posts, store_posts};
pub use storage::Storage;
pub use stream::{FeedClient, PostStream};

/// Default database filename
pub const DEFAULT_DB_NAME: &str = "xs.db";

/// Default feed endpoint for keyword-filtered streaming
pub const DEFAULT_ENDPOINT: &str = "https://stream.twitter.com/1.1/statuses/filter.json";

/// Default number of posts collected per session
pub const DEFAULT_SESSION_LIMIT: usize = 10;

/// Get the default data directory for xs
#[must_use]
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("xs")
}

/// Get the default database path
#[must_use]
pub fn default_db_path() -> std::path::PathBuf {
    default_data_dir().join(DEFAULT_DB_NAME)
}

/// Format an integer with thousands separators.
#[must_use]
pub fn format_number(value: i64) -> String {
    let abs = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(abs.len() + abs.len() / 3);

    for (idx, ch) in abs.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut formatted: String = out.chars().rev().collect();
    if value < 0 {
        formatted.insert(0, '-');
    }
    formatted
}

/// Escape text for CSV by sanitizing newlines and quotes.
#[must_use]
pub fn csv_escape_text(text: &str) -> String {
    text.replace('"', "\"\"").replace(['\n', '\r'], " ")
}
