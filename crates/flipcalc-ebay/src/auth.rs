//! Client-credentials token handling.
//!
//! Tokens are cached for at most an hour and dropped a minute before the
//! lifetime the token endpoint reports, so a search never goes out with a
//! token that expires in flight.

use std::time::{Duration, Instant};

pub(crate) const TOKEN_PATH: &str = "identity/v1/oauth2/token";
pub(crate) const API_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

const MAX_TOKEN_TTL_SECS: u64 = 3600;
const EXPIRY_MARGIN_SECS: u64 = 60;

/// How long a freshly issued token may be reused.
#[must_use]
pub fn token_lifetime(expires_in: Option<u64>) -> Duration {
    let secs = expires_in
        .unwrap_or(MAX_TOKEN_TTL_SECS)
        .min(MAX_TOKEN_TTL_SECS)
        .saturating_sub(EXPIRY_MARGIN_SECS);
    Duration::from_secs(secs)
}

#[derive(Clone)]
pub(crate) struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    pub(crate) fn new(value: String, expires_in: Option<u64>, issued_at: Instant) -> Self {
        Self {
            value,
            expires_at: issued_at + token_lifetime(expires_in),
        }
    }

    pub(crate) fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("value", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
