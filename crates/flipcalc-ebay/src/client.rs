//! HTTP client for the marketplace Browse API.
//!
//! Wraps `reqwest` with the client-credentials token exchange, a cached bearer
//! token, and typed search responses. Nothing is retried: every failure is
//! returned to the caller as an [`EbayError`].

use std::time::{Duration, Instant};

use flipcalc_core::{AppConfig, FeeSchedule, SearchParams};
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::auth::{CachedToken, API_SCOPE, TOKEN_PATH};
use crate::error::EbayError;
use crate::normalize::{normalize_listings, NormalizeReport};
use crate::query::SearchRequest;
use crate::types::{SearchResponse, TokenResponse};

const DEFAULT_BASE_URL: &str = "https://api.ebay.com/";
const SEARCH_PATH: &str = "buy/browse/v1/item_summary/search";

/// Client for the marketplace search API.
///
/// Use [`EbayClient::new`] for production or [`EbayClient::with_base_url`] to
/// point at a mock server in tests.
pub struct EbayClient {
    client: Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl EbayClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, EbayError> {
        Self::with_base_url(
            client_id,
            client_secret,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::InvalidBaseUrl`] if `api_base_url` does not parse,
    /// or [`EbayError::Http`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, EbayError> {
        Self::with_base_url(
            &config.ebay_client_id,
            &config.ebay_client_secret,
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`EbayError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, EbayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes Url::join append to the path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| EbayError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            token: Mutex::new(None),
        })
    }

    /// Returns a bearer token, exchanging credentials only when the cached
    /// token is missing or stale.
    ///
    /// # Errors
    ///
    /// - [`EbayError::TokenTransport`] on network failure.
    /// - [`EbayError::Auth`] if the endpoint rejects the credentials or returns
    ///   no token.
    /// - [`EbayError::Deserialize`] if the token response is not JSON.
    pub async fn access_token(&self) -> Result<String, EbayError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value().to_owned());
        }

        let token = self.fetch_token().await?;
        let value = token.value().to_owned();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken, EbayError> {
        let url = self.endpoint(TOKEN_PATH)?;
        tracing::debug!(%url, "requesting client-credentials token");

        let issued_at = Instant::now();
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", API_SCOPE)])
            .send()
            .await
            .map_err(EbayError::TokenTransport)?;

        let status = response.status();
        let body = response.text().await.map_err(EbayError::TokenTransport)?;
        if !status.is_success() {
            return Err(EbayError::Auth(format!(
                "token endpoint returned HTTP {}: {body}",
                status.as_u16()
            )));
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| EbayError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let Some(access_token) = parsed.access_token.filter(|t| !t.is_empty()) else {
            return Err(EbayError::Auth(
                "token response did not include an access_token".to_string(),
            ));
        };

        tracing::info!(expires_in = ?parsed.expires_in, "obtained marketplace access token");
        Ok(CachedToken::new(access_token, parsed.expires_in, issued_at))
    }

    /// Runs one search and returns the raw response.
    ///
    /// # Errors
    ///
    /// - Any token error from [`EbayClient::access_token`].
    /// - [`EbayError::SearchTransport`] on network failure or timeout, carrying
    ///   the request that was sent.
    /// - [`EbayError::Api`] on a non-2xx status, carrying the request that was sent.
    /// - [`EbayError::Deserialize`] if the body is not the expected shape.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, EbayError> {
        let token = self.access_token().await?;
        let url = self.endpoint(SEARCH_PATH)?;

        tracing::info!(query = %request.query, limit = request.limit, "searching marketplace");

        let transport_err = |source| EbayError::SearchTransport {
            context: request.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .query(&request.query_pairs())
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EbayError::Api {
                status: status.as_u16(),
                body,
                context: request.to_string(),
            });
        }

        let body = response.text().await.map_err(transport_err)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| EbayError::Deserialize {
                context: request.to_string(),
                source: e,
            })?;

        tracing::info!(
            returned = parsed.item_summaries.len(),
            total = ?parsed.total,
            "search completed"
        );
        Ok(parsed)
    }

    /// Searches with `params` and normalizes the results.
    ///
    /// # Errors
    ///
    /// Returns any error from [`EbayClient::search`]. Per-item problems are
    /// not errors; they are counted in the returned [`NormalizeReport`].
    pub async fn search_listings(
        &self,
        params: &SearchParams,
        fees: &FeeSchedule,
    ) -> Result<NormalizeReport, EbayError> {
        let request = SearchRequest::from_params(params);
        let response = self.search(&request).await?;
        Ok(normalize_listings(response.item_summaries, params, fees))
    }

    fn endpoint(&self, path: &str) -> Result<Url, EbayError> {
        self.base_url
            .join(path)
            .map_err(|e| EbayError::InvalidBaseUrl(format!("cannot join '{path}': {e}")))
    }
}
