//! How chat requests reach the agent.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::AgentError;
use crate::wire::{ChatReply, ChatRequest};

/// One round trip to the agent's chat endpoint.
pub trait ChatTransport: Send + Sync + 'static {
    fn post_chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, AgentError>> + Send;
}

/// `POST {base_url}/chat` over HTTP with JSON bodies.
///
/// No auth, no retries. Without a configured timeout a request waits as
/// long as the agent takes.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AgentError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self {
            client,
            url: format!("{}/chat", base_url.trim_end_matches('/')),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatTransport for HttpTransport {
    async fn post_chat(&self, request: &ChatRequest) -> Result<ChatReply, AgentError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|source| AgentError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| AgentError::Request {
            url: self.url.clone(),
            source,
        })?;

        debug!(status = status.as_u16(), len = body.len(), "agent responded");

        if !status.is_success() {
            return Err(AgentError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        ChatReply::decode(&body)
    }
}
