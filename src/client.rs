use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::{BacktestPayload, BacktestRequest};
use log::{debug, info};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the backtest backend contract:
/// `GET {base}/backtest/{symbol}?days={days}&capital={capital}`.
pub struct BacktestApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl BacktestApiClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let http = build_http_client(config.request_timeout)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Issues one fetch for the request. The symbol must already be
    /// validated/normalized by the caller.
    pub async fn fetch_backtest(
        &self,
        symbol: &str,
        request: &BacktestRequest,
    ) -> Result<BacktestPayload, DashboardError> {
        let url = format!("{}/backtest/{}", self.base_url, symbol);
        info!(
            "Requesting backtest for {} ({} days, {} capital)",
            symbol, request.days, request.capital
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("days", request.days.to_string()),
                ("capital", request.capital.to_string()),
            ])
            .send()
            .await
            .map_err(|err| {
                DashboardError::transport(format!("request to {} failed", url), Some(err))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            DashboardError::transport(format!("failed to read response from {}", url), Some(err))
        })?;
        debug!("Backend answered {} with {} bytes", status, body.len());

        // Two-phase parse: a body that is not JSON at all is a transport
        // failure, while valid JSON of the wrong shape is a malformed payload.
        let value: Value = serde_json::from_str(&body).map_err(|err| {
            DashboardError::transport(format!("non-JSON body from {} ({})", url, err), None)
        })?;
        serde_json::from_value(value)
            .map_err(|err| DashboardError::malformed(format!("unexpected payload shape: {}", err)))
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, DashboardError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| DashboardError::transport("failed to build HTTP client", Some(err)))
}
