use crate::format::FormattedMetrics;
use crate::ledger::TradeRow;
use crate::series::{PerformanceSeries, SentimentSeries};

/// UI state notifications emitted once per transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error(String),
}

impl UiState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UiState::Success | UiState::Error(_))
    }
}

/// Boundary between the core and the embedding UI shell. The core never
/// touches UI elements directly; it hands typed view models through this
/// trait. Implementations own the actual table/chart rendering.
pub trait RenderSink: Send {
    fn on_state(&mut self, state: &UiState);
    fn render_metrics(&mut self, metrics: &FormattedMetrics);
    fn render_performance(&mut self, series: &PerformanceSeries);
    fn render_sentiment(&mut self, series: &SentimentSeries);
    fn render_ledger(&mut self, rows: &[TradeRow]);
}

/// A chart object created by the external renderer. `release` tears down the
/// underlying resource and must be safe to call once per instance.
pub trait ChartHandle {
    fn release(&mut self);
}

/// Holds at most one live chart instance for a chart slot. Installing a new
/// chart releases the previous one first; dropping the slot releases too.
#[derive(Debug, Default)]
pub struct ChartSlot<H: ChartHandle> {
    live: Option<H>,
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new() -> Self {
        Self { live: None }
    }

    pub fn install(&mut self, chart: H) {
        self.release();
        self.live = Some(chart);
    }

    pub fn release(&mut self) {
        if let Some(mut chart) = self.live.take() {
            chart.release();
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn live(&self) -> Option<&H> {
        self.live.as_ref()
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.release();
    }
}

/// The two chart resources of the dashboard, one live instance each.
#[derive(Debug, Default)]
pub struct ChartSlots<H: ChartHandle> {
    pub performance: ChartSlot<H>,
    pub sentiment: ChartSlot<H>,
}

impl<H: ChartHandle> ChartSlots<H> {
    pub fn new() -> Self {
        Self {
            performance: ChartSlot::new(),
            sentiment: ChartSlot::new(),
        }
    }

    pub fn release_all(&mut self) {
        self.performance.release();
        self.sentiment.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingChart {
        id: usize,
        released: Arc<AtomicUsize>,
    }

    impl ChartHandle for CountingChart {
        fn release(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn installing_releases_the_previous_chart() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut slot = ChartSlot::new();

        slot.install(CountingChart {
            id: 1,
            released: Arc::clone(&released),
        });
        assert_eq!(released.load(Ordering::SeqCst), 0);

        slot.install(CountingChart {
            id: 2,
            released: Arc::clone(&released),
        });
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert_eq!(slot.live().map(|chart| chart.id), Some(2));
    }

    #[test]
    fn drop_releases_the_live_chart() {
        let released = Arc::new(AtomicUsize::new(0));
        {
            let mut slots = ChartSlots::new();
            slots.performance.install(CountingChart {
                id: 1,
                released: Arc::clone(&released),
            });
            slots.sentiment.install(CountingChart {
                id: 2,
                released: Arc::clone(&released),
            });
        }
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn release_is_idempotent_on_an_empty_slot() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut slot = ChartSlot::new();
        slot.install(CountingChart {
            id: 1,
            released: Arc::clone(&released),
        });
        slot.release();
        slot.release();
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(!slot.is_live());
    }
}
