use thiserror::Error;

/// Errors returned by the marketplace API client.
#[derive(Debug, Error)]
pub enum EbayError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network failure or timeout while searching.
    #[error("search request failed for {context}: {source}")]
    SearchTransport {
        /// The query and filters that were sent.
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// Network or TLS failure while exchanging credentials for a token.
    #[error("token request failed: {0}")]
    TokenTransport(#[source] reqwest::Error),

    /// The token endpoint rejected the credentials or returned no token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The search endpoint answered with a non-success status.
    #[error("search API returned HTTP {status} for {context}: {body}")]
    Api {
        status: u16,
        body: String,
        /// The query and filters that were sent.
        context: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
