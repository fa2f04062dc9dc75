pub mod auth;
pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::EbayClient;
pub use error::EbayError;
pub use normalize::{normalize_item, normalize_listings, NormalizeReport, SkipReason};
pub use query::SearchRequest;
pub use types::{ItemSummary, SearchResponse};
