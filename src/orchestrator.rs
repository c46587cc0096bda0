use crate::client::BacktestApiClient;
use crate::error::DashboardError;
use crate::format::{format_metrics, FormattedMetrics};
use crate::ledger::{extract_ledger, TradeRow, DEFAULT_LEDGER_LIMIT};
use crate::models::{BacktestRequest, BacktestResult};
use crate::render::{RenderSink, UiState};
use crate::series::{
    build_performance_series, build_sentiment_series, PerformanceSeries, SentimentSeries,
};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// How a finished `submit` call resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// This request's result reached the sink.
    Rendered,
    /// A later submission took over while this one was in flight; its
    /// response was discarded with no render and no state transition.
    Superseded,
}

/// Everything derived from one validated result, computed from a single
/// immutable snapshot so all views are mutually consistent.
struct RenderBundle {
    metrics: FormattedMetrics,
    performance: PerformanceSeries,
    sentiment: SentimentSeries,
    ledger: Vec<TradeRow>,
}

/// Owns the Idle -> Loading -> {Success, Error} state machine, issues the
/// backend fetch, and fans a validated result out to the formatter, the two
/// series builders, and the ledger extractor.
///
/// Concurrency contract: each submission takes a fresh generation number;
/// a response whose generation is no longer current is discarded, so only
/// the latest request's result is ever rendered.
pub struct Orchestrator {
    client: BacktestApiClient,
    sink: Mutex<Box<dyn RenderSink>>,
    state: Mutex<UiState>,
    generation: AtomicU64,
    ledger_limit: usize,
}

impl Orchestrator {
    pub fn new(client: BacktestApiClient, sink: Box<dyn RenderSink>) -> Self {
        Self {
            client,
            sink: Mutex::new(sink),
            state: Mutex::new(UiState::Idle),
            generation: AtomicU64::new(0),
            ledger_limit: DEFAULT_LEDGER_LIMIT,
        }
    }

    pub fn with_ledger_limit(mut self, limit: usize) -> Self {
        self.ledger_limit = limit;
        self
    }

    pub async fn state(&self) -> UiState {
        self.state.lock().await.clone()
    }

    /// Runs one request/render cycle. Invalid parameters are rejected before
    /// any state transition or network call; on every other path the Loading
    /// state entered here is left again, either by this submission or by a
    /// later one that superseded it.
    pub async fn submit(
        &self,
        request: BacktestRequest,
    ) -> Result<SubmitOutcome, DashboardError> {
        let symbol = request.validate()?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.enter_loading(generation, &symbol).await {
            return Ok(SubmitOutcome::Superseded);
        }

        let outcome = self.run_request(&symbol, &request).await;

        // All sink interaction is serialized through this lock; the
        // generation check under it guarantees a superseded response can
        // never interleave its renders with the winning submission's.
        let mut sink = self.sink.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                "Discarding superseded backtest response for {} (generation {})",
                symbol, generation
            );
            return Ok(SubmitOutcome::Superseded);
        }

        match outcome {
            Ok(bundle) => {
                sink.render_metrics(&bundle.metrics);
                sink.render_performance(&bundle.performance);
                sink.render_sentiment(&bundle.sentiment);
                sink.render_ledger(&bundle.ledger);
                self.transition(&mut **sink, UiState::Success).await;
                info!("Backtest for {} rendered", symbol);
                Ok(SubmitOutcome::Rendered)
            }
            Err(err) => {
                warn!("Backtest for {} failed: {}", symbol, err);
                self.transition(&mut **sink, UiState::Error(err.to_string()))
                    .await;
                Err(err)
            }
        }
    }

    /// Enters Loading on behalf of `generation`. Returns false when a later
    /// submission has already taken over between the generation grab and
    /// this lock acquisition; a stale submission must not touch the sink at
    /// all, or it could re-enter Loading after the winner's terminal state
    /// and leave the indicator stuck.
    async fn enter_loading(&self, generation: u64, symbol: &str) -> bool {
        let mut sink = self.sink.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                "Skipping superseded backtest submission for {} (generation {})",
                symbol, generation
            );
            return false;
        }
        self.transition(&mut **sink, UiState::Loading).await;
        true
    }

    async fn transition(&self, sink: &mut dyn RenderSink, next: UiState) {
        let mut state = self.state.lock().await;
        *state = next.clone();
        sink.on_state(&next);
    }

    /// Fetch, validate, and derive every view. Validation happens here, at
    /// the orchestrator boundary, so partially-invalid data never reaches
    /// the series builders or the ledger extractor.
    async fn run_request(
        &self,
        symbol: &str,
        request: &BacktestRequest,
    ) -> Result<RenderBundle, DashboardError> {
        let payload = self.client.fetch_backtest(symbol, request).await?;
        let result: BacktestResult = payload.into_result()?;

        let metrics = format_metrics(&result.metrics)?;
        let performance = build_performance_series(&result.data);
        let sentiment = build_sentiment_series(&result.data);
        let ledger = extract_ledger(&result.data, self.ledger_limit);

        Ok(RenderBundle {
            metrics,
            performance,
            sentiment,
            ledger,
        })
    }
}
