mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{FetchError, WindowError};
use crate::feed::RawResponse;
use crate::parser::parse_feed;
use crate::window::FeedWindow;
use auth::UrlParam;

/// NeoWs feed endpoint.
pub const DEFAULT_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Requests one feed window from `endpoint` through `client`.
///
/// Any credential is the client's business; nothing here sees it. Errors
/// coming out of reqwest are stripped of their URL so a key appended by a
/// wrapper client cannot leak into logs.
#[tracing::instrument(
    skip(client, window),
    fields(start_date = %window.start, end_date = %window.end)
)]
pub async fn fetch_feed<C: HttpClient>(
    client: &C,
    endpoint: &str,
    window: &FeedWindow,
) -> Result<RawResponse, FetchError> {
    let mut url = endpoint.parse::<reqwest::Url>().map_err(|e| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: format!("{e}"),
    })?;
    url.query_pairs_mut()
        .append_pair("start_date", &window.start_param())
        .append_pair("end_date", &window.end_param());

    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| FetchError::Transport(e.without_url()))?;

    let status = resp.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Feed request rejected");
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| FetchError::Transport(e.without_url()))?;
    debug!(bytes = bytes.len(), "Feed body received, parsing");

    Ok(parse_feed(&bytes)?)
}

/// Fetches `start_date..=end_date` from the public NeoWs endpoint.
pub async fn fetch(
    start_date: NaiveDate,
    end_date: NaiveDate,
    api_key: &str,
) -> Result<RawResponse, FetchError> {
    fetch_from(DEFAULT_FEED_URL, start_date, end_date, api_key).await
}

/// Same as [`fetch`] against a caller-chosen endpoint.
pub async fn fetch_from(
    endpoint: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    api_key: &str,
) -> Result<RawResponse, FetchError> {
    if end_date < start_date {
        return Err(FetchError::InvalidWindow(WindowError::Reversed));
    }
    let window = FeedWindow {
        start: start_date,
        end: end_date,
    };

    let client = UrlParam::api_key(BasicClient::new()?, api_key);
    fetch_feed(&client, endpoint, &window).await
}
