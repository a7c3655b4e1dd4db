//! Blocking feed client and post iterator.
//!
//! The streaming session is modeled as a plain blocking iterator: one GET
//! request whose response body is line-delimited JSON, one post per line.
//! The session limit is applied by the consumer via `take`, so the cutoff is
//! the iterator's termination condition rather than a side-effecting counter.

use std::io::{BufRead, BufReader};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::error::{Result, XsError};
use crate::model::{CollectedPost, RawPost};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the keyword-filtered streaming feed.
pub struct FeedClient {
    http: Client,
    endpoint: String,
    bearer_token: String,
}

impl FeedClient {
    /// Build a client for `endpoint` authenticated with `bearer_token`.
    ///
    /// The overall request timeout is disabled: a streaming read blocks
    /// until the session limit is reached or the connection ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, bearer_token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(None)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            bearer_token: bearer_token.into(),
        })
    }

    /// Open a streaming session filtered by `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`XsError::AuthRejected`] when the feed rejects the token,
    /// [`XsError::FeedConnect`] for any other non-success status, and
    /// [`XsError::HttpError`] when the request itself fails.
    pub fn open(&self, keyword: &str) -> Result<PostStream<BufReader<Response>>> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("track", keyword)])
            .bearer_auth(&self.bearer_token)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(XsError::AuthRejected {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(XsError::feed_connect(format!("feed returned HTTP {status}")));
        }

        debug!(endpoint = %self.endpoint, keyword, "stream opened");
        Ok(PostStream::new(BufReader::new(response)))
    }
}

/// Lazily yields one collected post per non-empty line of the feed body.
///
/// Blank lines are keep-alives and are skipped. The iterator ends when the
/// connection does; consumers bound the session with `take`.
pub struct PostStream<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> PostStream<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for PostStream<R> {
    type Item = Result<CollectedPost>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = self.line.trim();
                    if line.is_empty() {
                        // Keep-alive newline
                        continue;
                    }
                    return Some(parse_post(line));
                }
                Err(e) => return Some(Err(XsError::IoError(e))),
            }
        }
    }
}

fn parse_post(line: &str) -> Result<CollectedPost> {
    let raw: RawPost =
        serde_json::from_str(line).map_err(|e| XsError::malformed_post(e.to_string()))?;
    Ok(raw.into())
}
