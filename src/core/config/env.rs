use std::env;

use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(url)]
    pub api_url: String,
    pub api_token: Option<String>,
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
    #[validate(range(min = 1, max = 500))]
    pub page_size: u32,
    pub dashboard_metrics: Vec<String>,
    pub log_dir: Option<String>,
    pub log_level: String,
    pub debug_mode: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads and validates the vars.
    pub fn from_env() -> Result<Self, AppError> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let cfg = Self {
            api_url: get_var("BOXOFFICE_API_URL")?,
            api_token: get_opt("BOXOFFICE_API_TOKEN"),
            timeout_secs: parse_var("BOXOFFICE_TIMEOUT_SECS", "30")?,
            page_size: parse_var("BOXOFFICE_PAGE_SIZE", "15")?,
            dashboard_metrics: parse_csv(&get_var_or(
                "BOXOFFICE_DASHBOARD_METRICS",
                "orders,revenue,customers",
            )),
            log_dir: get_opt("BOXOFFICE_LOG_DIR"),
            log_level: get_var_or("LOG_LEVEL", "info"),
            debug_mode: get_opt("BOXOFFICE_DEBUG_MODE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        cfg.validate()
            .map_err(|e| AppError::Config(format!("invalid configuration: {e}")))?;

        Ok(cfg)
    }

    /// Base URL without a trailing slash, ready for `format!("{}{}", base, path)`.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// For testing: a config pointing at a specific base URL (e.g., wiremock).
    #[cfg(test)]
    pub fn for_base_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            api_token: Some("test-token".to_string()),
            timeout_secs: 5,
            page_size: 15,
            dashboard_metrics: vec!["orders".to_string()],
            log_dir: None,
            log_level: "debug".to_string(),
            debug_mode: false,
        }
    }
}

fn get_var(key: &str) -> Result<String, AppError> {
    get_opt(key).ok_or_else(|| AppError::Config(format!("{key} is required but not set")))
}

fn get_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_var_or(key: &str, default: &str) -> String {
    get_opt(key).unwrap_or_else(|| default.to_owned())
}

fn parse_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    get_var_or(key, default)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid {key}: {e}")))
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
