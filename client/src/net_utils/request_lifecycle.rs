//! Deadline-bounded HTTP execution with outcome classification.
//!
//! Every attempt races three things: the caller's cancellation token, the response, and a
//! deadline timer. Whichever loses is dropped, so a timed-out or cancelled attempt aborts
//! its connection instead of finishing in the background, and the timer never outlives
//! the attempt. There is no retry here.

use std::future::Future;
use std::time::Duration;

use reqwest::{RequestBuilder, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::DirectoryError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Result of exactly one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    Success(T),
    Timeout,
    TransportError(String),
    InvalidContentType(String),
    /// Declared JSON but the body did not decode into the expected shape.
    Malformed(String),
    HttpError(u16),
    /// Aborted by the caller because a newer attempt superseded it.
    Cancelled,
}

impl<T> RequestOutcome<T> {
    pub fn into_result(self) -> Result<T, DirectoryError> {
        match self {
            RequestOutcome::Success(payload) => Ok(payload),
            RequestOutcome::Timeout => Err(DirectoryError::Timeout),
            RequestOutcome::TransportError(message) => Err(DirectoryError::Transport(message)),
            RequestOutcome::InvalidContentType(message) => Err(DirectoryError::InvalidContentType(message)),
            RequestOutcome::Malformed(message) => Err(DirectoryError::Malformed(message)),
            RequestOutcome::HttpError(status) => Err(DirectoryError::Http(status)),
            RequestOutcome::Cancelled => Err(DirectoryError::Cancelled),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestOutcome<U> {
        match self {
            RequestOutcome::Success(payload) => RequestOutcome::Success(f(payload)),
            RequestOutcome::Timeout => RequestOutcome::Timeout,
            RequestOutcome::TransportError(message) => RequestOutcome::TransportError(message),
            RequestOutcome::InvalidContentType(message) => RequestOutcome::InvalidContentType(message),
            RequestOutcome::Malformed(message) => RequestOutcome::Malformed(message),
            RequestOutcome::HttpError(status) => RequestOutcome::HttpError(status),
            RequestOutcome::Cancelled => RequestOutcome::Cancelled,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RequestOutcome::Success(_) => "success",
            RequestOutcome::Timeout => "timeout",
            RequestOutcome::TransportError(_) => "transport_error",
            RequestOutcome::InvalidContentType(_) => "invalid_content_type",
            RequestOutcome::Malformed(_) => "malformed",
            RequestOutcome::HttpError(_) => "http_error",
            RequestOutcome::Cancelled => "cancelled",
        }
    }
}

/// Caller-side half of an issued request.
#[derive(Debug, Clone)]
pub struct CancelHandle(CancellationToken);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

#[derive(Debug, Clone)]
pub struct RequestLifecycle {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl RequestLifecycle {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    pub fn with_client(http_client: reqwest::Client, timeout: Duration) -> Self {
        Self { http_client, timeout }
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `request` and decodes a JSON body. The content type is checked before the
    /// status so an HTML error page is reported as a misconfigured endpoint, not parsed.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder, cancel: &CancellationToken) -> RequestOutcome<T> {
        self.with_deadline(cancel, receive_json(request)).await
    }

    /// Sends `request` and only looks at the status; the body is ignored.
    pub async fn execute_status(&self, request: RequestBuilder, cancel: &CancellationToken) -> RequestOutcome<()> {
        self.with_deadline(cancel, receive_status(request)).await
    }

    /// Splits an attempt into the future to await and a handle that aborts it.
    pub fn issue_json<T>(&self, request: RequestBuilder) -> (impl Future<Output = RequestOutcome<T>> + Send + use<T>, CancelHandle)
    where
        T: DeserializeOwned + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let handle = CancelHandle(cancel.clone());
        let lifecycle = self.clone();
        let attempt = async move { lifecycle.execute_json(request, &cancel).await };
        (attempt, handle)
    }

    async fn with_deadline<T>(&self, cancel: &CancellationToken, attempt: impl Future<Output = RequestOutcome<T>>) -> RequestOutcome<T> {
        let deadline = tokio::time::sleep(self.timeout);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => RequestOutcome::Cancelled,
            outcome = attempt => outcome,
            _ = deadline => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "request deadline elapsed, aborting transport");
                RequestOutcome::Timeout
            }
        };
        tracing::debug!(outcome = outcome.kind(), "request finished");
        outcome
    }
}

async fn receive_json<T: DeserializeOwned>(request: RequestBuilder) -> RequestOutcome<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return RequestOutcome::TransportError(e.to_string()),
    };
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.to_ascii_lowercase().contains(JSON_CONTENT_TYPE) {
        return RequestOutcome::InvalidContentType(format!(
            "expected {JSON_CONTENT_TYPE}, got {:?} with HTTP {}",
            content_type,
            status.as_u16()
        ));
    }
    if !status.is_success() {
        return RequestOutcome::HttpError(status.as_u16());
    }
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return RequestOutcome::TransportError(e.to_string()),
    };
    match serde_json::from_slice::<T>(&body) {
        Ok(payload) => RequestOutcome::Success(payload),
        Err(e) => RequestOutcome::Malformed(e.to_string()),
    }
}

async fn receive_status(request: RequestBuilder) -> RequestOutcome<()> {
    match request.send().await {
        Ok(response) if response.status().is_success() => RequestOutcome::Success(()),
        Ok(response) => RequestOutcome::HttpError(response.status().as_u16()),
        Err(e) => RequestOutcome::TransportError(e.to_string()),
    }
}
