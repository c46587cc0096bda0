use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

const API_BASE_ENV: &str = "DASHBOARD_API_BASE";
const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Startup configuration for the dashboard core. The backend base address is
/// the only environment-supplied value.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl DashboardConfig {
    pub fn new<S: Into<String>>(api_base_url: S) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url.into())?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Reads `DASHBOARD_API_BASE`, falling back to the default local backend.
    pub fn from_env() -> Result<Self> {
        match env::var(API_BASE_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::new(raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Requires an explicit http(s) scheme and strips trailing slashes so that
/// endpoint paths can be appended uniformly.
pub fn normalize_base_url(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{} must not be empty", API_BASE_ENV));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(anyhow!(
            "{} must start with http:// or https:// (value: {})",
            API_BASE_ENV,
            trimmed
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
