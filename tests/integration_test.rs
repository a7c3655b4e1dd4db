//! Integration tests for xs.
//!
//! These tests verify end-to-end functionality including:
//! - Post stream parsing and the session cutoff
//! - Clean, score, and store pipeline behavior
//! - SQLite schema and persistence

use std::io::Cursor;
use tempfile::TempDir;
use xs::{
    clean::clean_text,
    error::XsError,
    model::ScoredPost,
    sentiment::SentimentScorer,
    session::{collect_posts, run_session, score_posts, store_posts},
    storage::Storage,
    stream::PostStream,
};

/// Build one feed line in the wire format.
fn feed_line(id: i64, text: &str) -> String {
    serde_json::json!({
        "id": id,
        "text": text,
        "created_at": format!("Wed Jan 08 12:00:{:02} +0000 2025", id % 60),
        "coordinates": null,
        "user": {
            "location": "Test City",
            "followers_count": 100 + id,
            "friends_count": 50 + id,
        }
    })
    .to_string()
}

fn feed_body(texts: &[&str]) -> String {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| feed_line(i as i64 + 1, text) + "\n")
        .collect()
}

#[test]
fn test_full_pipeline_three_posts() {
    let body = feed_body(&[
        "great day @friend https://x.co !!",
        "this is horrible, truly awful",
        "the train departs at noon",
    ]);

    let stream = PostStream::new(Cursor::new(body));
    let (posts, interruption) = collect_posts(stream, 10).unwrap();
    assert_eq!(posts.len(), 3);
    assert!(interruption.is_none());

    let scorer = SentimentScorer::new();
    let scored = score_posts(&scorer, posts);

    let storage = Storage::open_memory().unwrap();
    let stored = store_posts(&storage, &scored).unwrap();
    assert_eq!(stored, 3);

    // Each persisted row's sentiment must match an independently computed
    // polarity of the cleaned text
    let rows = storage.fetch_all(None).unwrap();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        let expected = scorer.score(&clean_text(&row.post.tweet_text));
        assert!(
            (row.sentiment - expected).abs() < f64::EPSILON,
            "row {} scored {} but independent computation gives {}",
            row.post.tweet_id,
            row.sentiment,
            expected
        );
        assert!((-1.0..=1.0).contains(&row.sentiment));
    }

    // Source order is preserved
    assert_eq!(rows[0].post.tweet_id, 1);
    assert_eq!(rows[1].post.tweet_id, 2);
    assert_eq!(rows[2].post.tweet_id, 3);
    assert!(rows[0].sentiment > 0.0, "positive text scored positive");
    assert!(rows[1].sentiment < 0.0, "negative text scored negative");
}

#[test]
fn test_run_session_end_to_end() {
    let body = feed_body(&["what a wonderful launch", "completely broken and bad"]);
    let storage = Storage::open_memory().unwrap();
    let scorer = SentimentScorer::new();

    let stream = PostStream::new(Cursor::new(body));
    let report = run_session(stream, &scorer, &storage, 10).unwrap();

    assert_eq!(report.collected, 2);
    assert_eq!(report.stored, 2);
    assert!(report.interruption.is_none());
    assert_eq!(storage.count().unwrap(), 2);
}

#[test]
fn test_cutoff_stops_collection() {
    let texts: Vec<String> = (0..25).map(|i| format!("post number {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let stream = PostStream::new(Cursor::new(feed_body(&refs)));

    let (posts, _) = collect_posts(stream, 10).unwrap();
    assert_eq!(posts.len(), 10, "cutoff must stop collection at the limit");
}

#[test]
fn test_interruption_keeps_partial_data() {
    let mut body = feed_body(&["one fine post", "another fine post"]);
    body.push_str("{ this line is not valid json\n");
    body.push_str(&feed_line(99, "never reached"));

    let stream = PostStream::new(Cursor::new(body));
    let (posts, interruption) = collect_posts(stream, 10).unwrap();

    assert_eq!(posts.len(), 2);
    let reason = interruption.expect("interruption must be reported");
    assert!(reason.contains("Malformed"));
}

#[test]
fn test_interruption_before_first_post_is_fatal() {
    let stream = PostStream::new(Cursor::new("garbage\n".to_string()));
    let err = collect_posts(stream, 10).unwrap_err();
    assert!(matches!(err, XsError::MalformedPost { .. }));
}

#[test]
fn test_persisted_rows_have_fixed_schema() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("xs.db");

    let storage = Storage::open(&db_path).unwrap();
    let scorer = SentimentScorer::new();
    let stream = PostStream::new(Cursor::new(feed_body(&["a lovely afternoon"])));
    let (posts, _) = collect_posts(stream, 10).unwrap();
    store_posts(&storage, &score_posts(&scorer, posts)).unwrap();

    let column_count: i64 = storage
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('tweets')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(column_count, 8);
}

#[test]
fn test_reopening_store_appends() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("xs.db");
    let scorer = SentimentScorer::new();

    // First session
    {
        let storage = Storage::open(&db_path).unwrap();
        let stream = PostStream::new(Cursor::new(feed_body(&["first session post"])));
        let (posts, _) = collect_posts(stream, 10).unwrap();
        store_posts(&storage, &score_posts(&scorer, posts)).unwrap();
    }

    // Second session against the same store: no schema change, rows append
    let storage = Storage::open(&db_path).unwrap();
    let stream = PostStream::new(Cursor::new(feed_body(&["second session post"])));
    let (posts, _) = collect_posts(stream, 10).unwrap();
    store_posts(&storage, &score_posts(&scorer, posts)).unwrap();

    let rows = storage.fetch_all(None).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].post.tweet_text.contains("first"));
    assert!(rows[1].post.tweet_text.contains("second"));
}

#[test]
fn test_scores_round_to_two_decimals() {
    let texts = [
        "absolutely wonderful fantastic news today",
        "sad bad terrible loss",
        "neutral words about trains",
        "great day",
    ];
    let refs: Vec<&str> = texts.to_vec();
    let stream = PostStream::new(Cursor::new(feed_body(&refs)));
    let (posts, _) = collect_posts(stream, 10).unwrap();
    let scored: Vec<ScoredPost> = score_posts(&SentimentScorer::new(), posts);

    for s in &scored {
        let scaled = s.sentiment * 100.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-9,
            "{} is not a two-decimal value",
            s.sentiment
        );
    }
}

#[test]
fn test_missing_author_fields_become_literal_none() {
    let line = serde_json::json!({
        "id": 7,
        "text": "minimal post",
        "created_at": "Wed Jan 08 12:00:00 +0000 2025",
        "user": {}
    })
    .to_string();

    let stream = PostStream::new(Cursor::new(line + "\n"));
    let (posts, _) = collect_posts(stream, 10).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].location, "None");
    assert_eq!(posts[0].geo_coordinates, "None");
    assert_eq!(posts[0].no_of_followers, 0);
}
