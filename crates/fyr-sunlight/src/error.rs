use thiserror::Error;

/// Errors returned by the Sunlight legislator lookup client.
#[derive(Debug, Error)]
pub enum SunlightError {
    /// Network or TLS failure, or a non-2xx status, from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The provider is only reachable over plain HTTP and the host page is
    /// served over HTTPS; the request is refused before it is sent.
    #[error("{0}")]
    InsecureTransport(String),
}
