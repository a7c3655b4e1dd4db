//! Data models for collected posts.
//!
//! `RawPost` mirrors the wire shape of the feed; `CollectedPost` is the
//! normalized record accumulated during a session, and `ScoredPost` is the
//! same record after its sentiment has been appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as it arrives off the feed, one JSON object per line.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: i64,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub coordinates: Option<serde_json::Value>,
    pub user: RawUser,
}

/// Author fields consumed from the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub friends_count: i64,
}

/// A post captured during a session, before scoring.
///
/// Absent location and coordinates are stored as the literal string "None".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedPost {
    pub tweet_id: i64,
    pub tweet_text: String,
    pub created_at: String,
    pub location: String,
    pub geo_coordinates: String,
    pub no_of_followers: i64,
    pub no_of_friends: i64,
}

impl From<RawPost> for CollectedPost {
    fn from(raw: RawPost) -> Self {
        Self {
            tweet_id: raw.id,
            tweet_text: raw.text,
            created_at: raw.created_at,
            location: raw.user.location.unwrap_or_else(|| "None".to_string()),
            geo_coordinates: raw
                .coordinates
                .as_ref()
                .map_or_else(|| "None".to_string(), serde_json::Value::to_string),
            no_of_followers: raw.user.followers_count,
            no_of_friends: raw.user.friends_count,
        }
    }
}

/// A collected post with its sentiment appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPost {
    #[serde(flatten)]
    pub post: CollectedPost,
    /// Polarity in [-1.0, 1.0], rounded to two decimal places.
    pub sentiment: f64,
}

/// Aggregates over the stored rows, for the `stats` command.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub rows: i64,
    pub avg_sentiment: Option<f64>,
    pub min_sentiment: Option<f64>,
    pub max_sentiment: Option<f64>,
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
    pub generated_at: DateTime<Utc>,
}
