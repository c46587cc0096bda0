//! Client-side results-presentation core for a trading-strategy backtest
//! dashboard: fetches a result payload from the backend, validates it, and
//! derives the metric cards, the two chart view models, and the recent-trades
//! ledger, while driving the request state machine.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod ledger;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod series;

pub use client::BacktestApiClient;
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use format::{format_metrics, Classification, ClassifiedValue, FormattedMetrics};
pub use ledger::{extract_ledger, TradeRow, DEFAULT_LEDGER_LIMIT};
pub use models::{BacktestRequest, BacktestResult, DailyRecord, Metrics, Signal};
pub use orchestrator::{Orchestrator, SubmitOutcome};
pub use render::{ChartHandle, ChartSlot, ChartSlots, RenderSink, UiState};
pub use series::{
    build_performance_series, build_sentiment_series, PerformanceSeries, SentimentSeries,
    SignalPoint,
};
