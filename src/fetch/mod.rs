//! Resilient reads against the backend HTTP façade.
//!
//! Every read is a single attempt bounded by a hard deadline. Whatever goes
//! wrong (refused connection, deadline, non-2xx status, unparseable body) the
//! caller gets the fallback value it supplied and `is_real == false`. Retrying
//! is left to the next poll tick.

mod error;

pub use error::*;

use crate::settings::ConnectionSettings;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Deadline for ordinary reads.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(2000);

/// Deadline for the connectivity probe.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(1000);

/// Deadline for config writes.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Outcome of one read: either the backend's answer or the fallback.
///
/// Never partial: `data` is the whole parsed body when `is_real`, and exactly
/// the supplied fallback otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult<T> {
    pub data: T,
    pub is_real: bool,
}

impl<T> FetchResult<T> {
    pub fn real(data: T) -> Self {
        Self {
            data,
            is_real: true,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            is_real: false,
        }
    }

    /// Collapse a read outcome into a tagged value, discarding the error.
    pub fn absorb(result: Result<T, Unreachable>, fallback: T) -> Self {
        match result {
            Ok(data) => Self::real(data),
            Err(_) => Self::fallback(fallback),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        FetchResult {
            data: f(self.data),
            is_real: self.is_real,
        }
    }
}

/// HTTP client bound to the live [`ConnectionSettings`].
///
/// The base URL is read from the settings at the start of every request, so a
/// `set` is visible to the very next call.
#[derive(Debug, Clone)]
pub struct ResilientFetch {
    client: reqwest::Client,
    settings: Arc<ConnectionSettings>,
}

impl ResilientFetch {
    pub fn new(settings: Arc<ConnectionSettings>) -> Self {
        Self::with_client(settings, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxies, custom TLS, tests).
    pub fn with_client(settings: Arc<ConnectionSettings>, client: reqwest::Client) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &Arc<ConnectionSettings> {
        &self.settings
    }

    /// GET `path` and decode the JSON body, or fall back.
    pub async fn call<T>(&self, path: &str, fallback: T, timeout: Duration) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        FetchResult::absorb(self.try_get(path, timeout).await, fallback)
    }

    /// GET `path` and decode the JSON body, reporting why it failed.
    pub async fn try_get<T>(&self, path: &str, timeout: Duration) -> Result<T, Unreachable>
    where
        T: DeserializeOwned,
    {
        let url = self.settings.get().endpoint(path);
        let request = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        with_deadline(timeout, async {
            let response = request
                .send()
                .await
                .map_err(|e| Unreachable::from_reqwest(e, millis(timeout)))?;
            if !response.status().is_success() {
                return Err(Unreachable::HttpStatus(response.status().as_u16()));
            }
            let body = response
                .bytes()
                .await
                .map_err(|e| Unreachable::from_reqwest(e, millis(timeout)))?;
            serde_json::from_slice(&body).map_err(|e| Unreachable::Parse(e.to_string()))
        })
        .await
    }

    /// POST a JSON body; any 2xx is success and the response body is ignored.
    pub async fn try_post<B>(&self, path: &str, body: &B, timeout: Duration) -> Result<(), Unreachable>
    where
        B: Serialize + ?Sized,
    {
        let url = self.settings.get().endpoint(path);
        let request = self
            .client
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body);

        with_deadline(timeout, async {
            let response = request
                .send()
                .await
                .map_err(|e| Unreachable::from_reqwest(e, millis(timeout)))?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(Unreachable::HttpStatus(response.status().as_u16()))
            }
        })
        .await
    }

    /// GET `path` and look only at the status code.
    pub async fn probe(&self, path: &str, timeout: Duration) -> Result<(), Unreachable> {
        let url = self.settings.get().endpoint(path);
        let request = self.client.get(url);

        with_deadline(timeout, async {
            let response = request
                .send()
                .await
                .map_err(|e| Unreachable::from_reqwest(e, millis(timeout)))?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(Unreachable::HttpStatus(response.status().as_u16()))
            }
        })
        .await
    }
}

/// Run `fut` under a hard deadline; on expiry the request future is dropped,
/// which aborts the in-flight request.
async fn with_deadline<T>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, Unreachable>>,
) -> Result<T, Unreachable> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(Unreachable::Timeout(millis(timeout))),
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
