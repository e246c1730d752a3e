//! Application configuration

use std::env;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub host: String,
    pub port: u16,
    /// How far back the contribution calendar reaches (days)
    pub lookback_days: u32,
    /// Page size for paginated GraphQL searches
    pub fetch_page_size: u32,
    /// Background refresh interval in minutes (0 = disabled)
    pub refresh_interval_mins: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            github_token: env::var("GITHUB_TOKEN").ok(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            lookback_days: env::var("LOOKBACK_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(365),
            fetch_page_size: env::var("FETCH_PAGE_SIZE")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(100),
            refresh_interval_mins: env::var("REFRESH_INTERVAL_MINS")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(15),
        }
    }
}
