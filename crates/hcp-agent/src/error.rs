use thiserror::Error;

/// Why a request to the agent failed.
///
/// Callers treat every variant the same way ("request failed"); the split
/// only exists for diagnostics.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("agent returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("HTTP client config error: {0}")]
    Config(String),
}
