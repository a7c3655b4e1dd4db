//! Collection pipeline orchestration.
//!
//! A session is one pass through collect, clean, score, and store, bounded
//! by the configured post limit. All state lives in the collector passed
//! between stages; there are no global accumulators.

use tracing::{info, warn};

use crate::clean::clean_text;
use crate::error::{Result, XsError};
use crate::model::{CollectedPost, ScoredPost};
use crate::sentiment::SentimentScorer;
use crate::storage::Storage;

/// Outcome of one collection session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Posts collected from the feed.
    pub collected: usize,
    /// Rows written to the store.
    pub stored: usize,
    /// Set when the feed dropped before the limit was reached.
    pub interruption: Option<String>,
}

/// Collect up to `limit` posts from the stream.
///
/// The limit is the iterator's termination condition. A feed error before
/// the first post is fatal; after at least one post it ends collection and
/// the partial data is kept, with the reason reported alongside.
///
/// # Errors
///
/// Returns the stream error when no post has been collected yet.
pub fn collect_posts<I>(stream: I, limit: usize) -> Result<(Vec<CollectedPost>, Option<String>)>
where
    I: Iterator<Item = Result<CollectedPost>>,
{
    let mut posts = Vec::with_capacity(limit);
    let mut interruption = None;

    for item in stream.take(limit) {
        match item {
            Ok(post) => posts.push(post),
            Err(e) if posts.is_empty() => return Err(e),
            Err(e) => {
                let err = XsError::FeedInterrupted {
                    collected: posts.len(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "keeping partial data");
                interruption = Some(err.to_string());
                break;
            }
        }
    }

    info!(collected = posts.len(), limit, "collection finished");
    Ok((posts, interruption))
}

/// Clean each post's text and append its sentiment.
#[must_use]
pub fn score_posts(scorer: &SentimentScorer, posts: Vec<CollectedPost>) -> Vec<ScoredPost> {
    posts
        .into_iter()
        .map(|post| {
            let sentiment = scorer.score(&clean_text(&post.tweet_text));
            ScoredPost { post, sentiment }
        })
        .collect()
}

/// Append all scored posts to the store, one committed row per post.
///
/// # Errors
///
/// Returns the storage error of the failing insert; rows inserted before it
/// remain committed.
pub fn store_posts(storage: &Storage, posts: &[ScoredPost]) -> Result<usize> {
    for post in posts {
        storage.insert_post(post)?;
    }
    Ok(posts.len())
}

/// Run one full session over an already-opened stream: collect up to
/// `limit` posts, score them, and persist the result.
///
/// # Errors
///
/// Returns an error on a feed failure before the first post or a storage
/// failure.
pub fn run_session<I>(
    stream: I,
    scorer: &SentimentScorer,
    storage: &Storage,
    limit: usize,
) -> Result<SessionReport>
where
    I: Iterator<Item = Result<CollectedPost>>,
{
    let (posts, interruption) = collect_posts(stream, limit)?;
    let scored = score_posts(scorer, posts);
    let stored = store_posts(storage, &scored)?;

    Ok(SessionReport {
        collected: scored.len(),
        stored,
        interruption,
    })
}

#[cfg(test)]
mod tests {
    use super::{collect_posts, score_posts, store_posts};
    use crate::clean::clean_text;
    use crate::error::XsError;
    use crate::model::CollectedPost;
    use crate::sentiment::SentimentScorer;
    use crate::storage::Storage;

    fn post(id: i64, text: &str) -> CollectedPost {
        CollectedPost {
            tweet_id: id,
            tweet_text: text.to_string(),
            created_at: "Wed Jan 08 12:00:00 +0000 2025".to_string(),
            location: "None".to_string(),
            geo_coordinates: "None".to_string(),
            no_of_followers: 0,
            no_of_friends: 0,
        }
    }

    #[test]
    fn collection_stops_at_the_limit() {
        let stream = (0..100).map(|i| Ok(post(i, "t")));
        let (posts, interruption) = collect_posts(stream, 10).unwrap();
        assert_eq!(posts.len(), 10);
        assert!(interruption.is_none());
    }

    #[test]
    fn short_stream_yields_what_arrived() {
        let stream = (0..3).map(|i| Ok(post(i, "t")));
        let (posts, interruption) = collect_posts(stream, 10).unwrap();
        assert_eq!(posts.len(), 3);
        assert!(interruption.is_none());
    }

    #[test]
    fn error_before_first_post_is_fatal() {
        let stream = std::iter::once(Err(XsError::malformed_post("garbage")));
        assert!(collect_posts(stream, 10).is_err());
    }

    #[test]
    fn error_after_first_post_keeps_partial_data() {
        let stream = vec![
            Ok(post(1, "a")),
            Ok(post(2, "b")),
            Err(XsError::malformed_post("garbage")),
            Ok(post(3, "never reached")),
        ]
        .into_iter();
        let (posts, interruption) = collect_posts(stream, 10).unwrap();
        assert_eq!(posts.len(), 2);
        assert!(interruption.is_some());
    }

    #[test]
    fn scoring_appends_polarity_of_cleaned_text() {
        let scorer = SentimentScorer::new();
        let raw = "I love this! @someone https://x.co";
        let scored = score_posts(&scorer, vec![post(1, raw)]);
        assert_eq!(scored.len(), 1);
        // Raw text is preserved; the score reflects the cleaned text
        assert_eq!(scored[0].post.tweet_text, raw);
        let expected = scorer.score(&clean_text(raw));
        assert!((scored[0].sentiment - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn storing_writes_one_row_per_post() {
        let scorer = SentimentScorer::new();
        let storage = Storage::open_memory().unwrap();
        let scored = score_posts(&scorer, vec![post(1, "good"), post(2, "bad")]);
        let stored = store_posts(&storage, &scored).unwrap();
        assert_eq!(stored, 2);
        assert_eq!(storage.count().unwrap(), 2);
    }
}
