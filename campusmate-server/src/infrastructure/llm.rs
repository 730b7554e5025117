use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use futures_util::stream::BoxStream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::domain::error::DomainError;
use crate::infrastructure::config::LlmConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Opens a streaming completion and hands back the raw upstream body.
    ///
    /// Connection failures and non-success statuses are reported before any
    /// byte is produced, so the caller can still answer with a JSON error.
    pub async fn relay(
        &self,
        messages: &[ChatMessage],
        failure_message: &str,
    ) -> Result<RelayStream, DomainError> {
        let payload = CompletionRequest {
            model: &self.model,
            messages,
            stream: true,
        };

        let mut request = self.http.post(self.completions_url()).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!("llm request failed: {}", e);
            DomainError::Upstream(failure_message.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "llm endpoint rejected request");
            return Err(DomainError::Upstream(failure_message.to_string()));
        }

        debug!(model = %self.model, messages = messages.len(), "llm stream opened");
        Ok(RelayStream::new(Box::pin(response.bytes_stream())))
    }
}

/// One-way pipe from the upstream response body to the downstream client.
///
/// Chunks are passed through untouched. Dropping the stream, which actix does
/// when the client goes away, drops the upstream body and frees its
/// connection.
pub struct RelayStream {
    inner: BoxStream<'static, Result<Bytes, reqwest::Error>>,
    forwarded: usize,
    finished: bool,
}

impl RelayStream {
    pub fn new(inner: BoxStream<'static, Result<Bytes, reqwest::Error>>) -> Self {
        Self {
            inner,
            forwarded: 0,
            finished: false,
        }
    }
}

impl Stream for RelayStream {
    type Item = Result<Bytes, reqwest::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                self.forwarded += chunk.len();
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(err))) => {
                warn!("llm stream interrupted: {}", err);
                self.finished = true;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for RelayStream {
    fn drop(&mut self) {
        if self.finished {
            info!(bytes = self.forwarded, "llm stream closed");
        } else {
            info!(bytes = self.forwarded, "llm stream cancelled by client");
        }
    }
}
