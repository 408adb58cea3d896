use thiserror::Error;

/// Failure modes of a `plzDetail` query.
///
/// Only transport failures are worth retrying; every other kind points at the
/// payload itself and will not resolve without an upstream change.
#[derive(Debug, Error)]
pub enum MeteoSwissError {
    /// The HTTPS request failed or timed out.
    #[error("request to the MeteoSwiss API failed")]
    Transport(#[source] anyhow::Error),

    /// The response body is not valid JSON (possibly truncated).
    #[error("response body is not valid JSON")]
    Parse(#[source] serde_json::Error),

    /// The response parsed, but its root is not a JSON object.
    #[error("response root is not a JSON object")]
    NotAnObject,

    /// A key the extractor depends on is absent, or a required array-typed
    /// field is not an array.
    #[error("required key '{0}' is missing or has the wrong type")]
    MissingKey(String),

    /// A validated top-level section turned out unusable at extraction time.
    #[error("'{0}' section is malformed")]
    MalformedSection(&'static str),
}

impl MeteoSwissError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, MeteoSwissError::Transport(_))
    }
}
