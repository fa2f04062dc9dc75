use std::path::PathBuf;

use crate::fees::FeeSchedule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub ebay_client_id: String,
    pub ebay_client_secret: String,
    /// Root of the marketplace API; both the token and search endpoints hang off it.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub saved_searches_path: PathBuf,
    pub export_dir: PathBuf,
    pub fees: FeeSchedule,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("ebay_client_id", &"[redacted]")
            .field("ebay_client_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("saved_searches_path", &self.saved_searches_path)
            .field("export_dir", &self.export_dir)
            .field("fees", &self.fees)
            .finish()
    }
}
