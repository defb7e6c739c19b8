//! HTTP client for the blackbox VRAM streaming endpoint.
//!
//! Owns the connection lifecycle up to the first byte: builds the
//! request, checks the response status, and hands the raw byte stream
//! to the consumer loop.

use bytes::Bytes;
use futures_util::stream::Stream;
use futures_util::StreamExt;
use reqwest::Client;
use std::pin::Pin;
use thiserror::Error;

/// Default server address when `--url` is not given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:6767";

/// Fatal errors while establishing the stream.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be built or sent
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// A mid-stream transport failure, anything but clean end-of-input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("stream read error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Raw byte stream handed to the consumer loop.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Client for the `/vram/stream` SSE endpoint.
pub struct VramClient {
    base_url: String,
    client: Client,
}

impl VramClient {
    /// Build a client for the given base URL.
    ///
    /// No request timeout is configured and keep-alive stays enabled:
    /// the stream is expected to remain open indefinitely, emitting a
    /// snapshot every few seconds.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// The full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!("{}/vram/stream", self.base_url.trim_end_matches('/'))
    }

    /// Open the SSE stream.
    ///
    /// Connection failures and non-2xx responses are fatal for the
    /// run; mid-stream read errors surface through the returned
    /// stream as [`TransportError`] items.
    pub async fn connect(&self) -> Result<ByteStream, ClientError> {
        let response = self
            .client
            .get(self.stream_url())
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Box::pin(
            response
                .bytes_stream()
                .map(|item| item.map_err(TransportError::from)),
        ))
    }
}
