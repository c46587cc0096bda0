use crate::error::DashboardError;
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// User input for one backtest run. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct BacktestRequest {
    pub symbol: String,
    pub days: u32,
    pub capital: f64,
}

impl BacktestRequest {
    pub fn new<S: Into<String>>(symbol: S, days: u32, capital: f64) -> Self {
        Self {
            symbol: symbol.into(),
            days,
            capital,
        }
    }

    /// Checks request parameters before any network call is made.
    /// Returns the normalized ticker symbol on success.
    pub fn validate(&self) -> Result<String, DashboardError> {
        let Some(symbol) = normalize_ticker_symbol(&self.symbol) else {
            return Err(DashboardError::Validation(
                "symbol must not be empty".to_string(),
            ));
        };
        if self.days == 0 {
            return Err(DashboardError::Validation(
                "days must be a positive integer".to_string(),
            ));
        }
        if !self.capital.is_finite() || self.capital <= 0.0 {
            return Err(DashboardError::Validation(format!(
                "capital must be a positive number (value: {})",
                self.capital
            )));
        }
        Ok(symbol)
    }
}

/// Normalizes a ticker string by trimming whitespace and uppercasing.
pub fn normalize_ticker_symbol(value: &str) -> Option<String> {
    let normalized = value.trim().to_uppercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }

    /// BUY and SELL records are trades; HOLD records are not.
    pub fn is_trade(&self) -> bool {
        matches!(self, Signal::Buy | Signal::Sell)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Signal::Buy),
            "SELL" => Ok(Signal::Sell),
            "HOLD" => Ok(Signal::Hold),
            other => Err(anyhow!("Unknown signal '{}'", other)),
        }
    }
}

// Wire types. Dates stay strings and signals stay optional strings here so
// that contract violations are reported as malformed payloads during
// validation instead of failing inside serde with a transport-shaped error.

#[derive(Debug, Clone, Deserialize)]
pub struct BacktestPayload {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<RawDailyRecord>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub error: Option<String>,
    /// Echoed by the backend; accepted but unused.
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyRecord {
    pub date: String,
    pub price: f64,
    pub sentiment: f64,
    #[serde(default)]
    pub signal: Option<String>,
    pub portfolio_value: f64,
    pub buy_hold_value: f64,
    #[serde(default)]
    pub holdings: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metrics {
    pub strategy_return: f64,
    pub buy_hold_return: f64,
    pub outperformance: f64,
    pub strategy_sharpe: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub total_trades: u32,
    pub final_portfolio_value: f64,
}

/// One validated day of the backtest.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub price: f64,
    pub sentiment: f64,
    pub signal: Signal,
    pub portfolio_value: f64,
    pub buy_hold_value: f64,
    /// Shares held as of this record; meaningful primarily on trade records.
    pub holdings: f64,
}

/// A fully validated backtest result, owned by the orchestrator for one
/// request/render cycle and superseded (never mutated) by the next.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub data: Vec<DailyRecord>,
    pub metrics: Metrics,
}

impl BacktestPayload {
    /// Validates a `success = true` payload against the data-model
    /// invariants and converts it into the typed domain form.
    ///
    /// A `success = false` payload surfaces its error message verbatim.
    pub fn into_result(self) -> Result<BacktestResult, DashboardError> {
        if !self.success {
            let message = self
                .error
                .unwrap_or_else(|| "backend reported failure without a message".to_string());
            return Err(DashboardError::Backend(message));
        }

        if self.data.is_empty() {
            return Err(DashboardError::malformed(
                "successful response contains no daily records",
            ));
        }
        let Some(metrics) = self.metrics else {
            return Err(DashboardError::malformed(
                "successful response is missing metrics",
            ));
        };

        let mut data = Vec::with_capacity(self.data.len());
        let mut previous_date: Option<NaiveDate> = None;
        for (index, raw) in self.data.into_iter().enumerate() {
            let record = validate_record(index, raw)?;
            if let Some(previous) = previous_date {
                if record.date <= previous {
                    return Err(DashboardError::malformed(format!(
                        "record {} date {} is not strictly after {}",
                        index, record.date, previous
                    )));
                }
            }
            previous_date = Some(record.date);
            data.push(record);
        }

        Ok(BacktestResult { data, metrics })
    }
}

fn validate_record(index: usize, raw: RawDailyRecord) -> Result<DailyRecord, DashboardError> {
    let date = parse_record_date(&raw.date).ok_or_else(|| {
        DashboardError::malformed(format!(
            "record {} has unparseable date '{}'",
            index, raw.date
        ))
    })?;

    // The signal domain is exactly three categories; anything else is a
    // contract violation, never coerced. Absent means no trade that day.
    let signal = match raw.signal.as_deref() {
        None => Signal::Hold,
        Some(value) => value.parse::<Signal>().map_err(|_| {
            DashboardError::malformed(format!(
                "record {} has unknown signal '{}'",
                index, value
            ))
        })?,
    };

    for (field, value) in [
        ("price", raw.price),
        ("sentiment", raw.sentiment),
        ("portfolio_value", raw.portfolio_value),
        ("buy_hold_value", raw.buy_hold_value),
    ] {
        if !value.is_finite() {
            return Err(DashboardError::malformed(format!(
                "record {} has non-finite {} ({})",
                index, field, value
            )));
        }
    }
    if raw.price < 0.0 {
        return Err(DashboardError::malformed(format!(
            "record {} has negative price {}",
            index, raw.price
        )));
    }

    let holdings = raw.holdings.unwrap_or(0.0);
    if !holdings.is_finite() || holdings < 0.0 {
        return Err(DashboardError::malformed(format!(
            "record {} has invalid holdings {}",
            index, holdings
        )));
    }

    Ok(DailyRecord {
        date,
        price: raw.price,
        sentiment: raw.sentiment,
        signal,
        portfolio_value: raw.portfolio_value,
        buy_hold_value: raw.buy_hold_value,
        holdings,
    })
}

/// The backend emits ISO dates, either bare (`2024-01-02`) or as a full
/// timestamp (`2024-01-02T00:00:00`). Only the calendar date is kept.
fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
