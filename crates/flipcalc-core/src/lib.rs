pub mod aggregate;
pub mod app_config;
pub mod category;
pub mod config;
pub mod fees;
pub mod listing;
pub mod money;
pub mod params;
pub mod profit;
pub mod seller;
pub mod session;

pub use aggregate::{aggregate, summarize, AggregatedResults, ResultSummary};
pub use app_config::{AppConfig, Environment};
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use fees::{FeeSchedule, FeeTier};
pub use listing::NormalizedListing;
pub use params::{CostBasis, ParamsError, SearchParams};
pub use profit::{
    estimate_profit, estimate_with_basis, solve_target_cost, EstimateInputs, ProfitEstimate,
};
pub use seller::{classify_seller, SellerTier};
pub use session::{
    load_saved_searches, store_saved_searches, SaveOutcome, SavedSearch, SessionState,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to access saved searches at {path}: {source}")]
    SavedSearchIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse saved searches: {0}")]
    SavedSearchParse(#[source] serde_yaml::Error),

    #[error("failed to serialize saved searches: {0}")]
    SavedSearchWrite(#[source] serde_yaml::Error),

    #[error("saved searches validation failed: {0}")]
    Validation(String),
}
