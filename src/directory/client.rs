//! Upstream access for the user list. The transport is kept behind
//! [`UserSource`] so the loader can be driven by a fake in tests; validation of
//! status and payload lives here, in one place, for every source.

use crate::directory::{errors::FetchError, types::UserRecord};
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::{future::Future, time::Duration};
use tracing::{debug, instrument};
use url::Url;

/// Default request timeout applied to the upstream call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What came back from the upstream, before any validation.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can issue the single GET a load needs.
pub trait UserSource: Send + Sync {
    /// Perform the request. Only failures that prevent a response are errors here.
    fn get(&self) -> impl Future<Output = Result<RawResponse, FetchError>> + Send;

    /// Human readable location of the source, used in logs and health output.
    fn describe(&self) -> String;
}

/// [`UserSource`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpUserSource {
    client: Client,
    url: Url,
}

impl HttpUserSource {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl UserSource for HttpUserSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn get(&self) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        debug!("upstream responded: {}", status);

        let body = response.bytes().await.map_err(map_request_error)?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

fn map_request_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Transport("request timed out".to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// Issue one request and validate it into a non-empty list of users.
///
/// # Errors
/// Returns [`FetchError`] if the request fails, the status is not 2xx, the body
/// is not JSON, or the JSON is not a non-empty array of user records.
pub async fn fetch_users<S: UserSource>(source: &S) -> Result<Vec<UserRecord>, FetchError> {
    let response = source.get().await?;

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
            reason: response.reason,
        });
    }

    parse_users(&response.body)
}

/// Validate a response body into a non-empty list of users.
///
/// # Errors
/// Returns [`FetchError::Parse`] for invalid JSON and [`FetchError::Shape`] for
/// anything but a non-empty array of user-shaped objects.
pub fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>, FetchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| FetchError::Parse(err.to_string()))?;

    let Value::Array(items) = value else {
        return Err(FetchError::no_data());
    };

    if items.is_empty() {
        return Err(FetchError::no_data());
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<UserRecord>(item).map_err(|err| {
                FetchError::Shape(format!("Malformed user record at index {index}: {err}"))
            })
        })
        .collect()
}
