use crate::format::Classification;
use crate::models::{DailyRecord, Signal};
use chrono::NaiveDate;

/// Display form used for chart labels and signal markers.
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A signal marker projected onto the strategy curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPoint {
    pub x: String,
    pub y: f64,
}

/// View model for the strategy-vs-buy-and-hold chart. `labels`, `strategy`
/// and `buy_hold` are index-aligned over the full record sequence; signal
/// subsets preserve relative chronological order. Colors and markers are the
/// renderer's concern, not carried here.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSeries {
    pub labels: Vec<String>,
    pub strategy: Vec<f64>,
    pub buy_hold: Vec<f64>,
    pub buy_signals: Vec<SignalPoint>,
    pub sell_signals: Vec<SignalPoint>,
}

/// View model for the sentiment-vs-price chart, index-aligned with the same
/// labels as the performance series when built from the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSeries {
    pub labels: Vec<String>,
    pub sentiment: Vec<f64>,
    pub price: Vec<f64>,
    pub sentiment_sign: Vec<Classification>,
}

pub fn build_performance_series(data: &[DailyRecord]) -> PerformanceSeries {
    let mut series = PerformanceSeries {
        labels: Vec::with_capacity(data.len()),
        strategy: Vec::with_capacity(data.len()),
        buy_hold: Vec::with_capacity(data.len()),
        buy_signals: Vec::new(),
        sell_signals: Vec::new(),
    };

    for record in data {
        let label = format_chart_date(record.date);
        series.strategy.push(record.portfolio_value);
        series.buy_hold.push(record.buy_hold_value);
        match record.signal {
            Signal::Buy => series.buy_signals.push(SignalPoint {
                x: label.clone(),
                y: record.portfolio_value,
            }),
            Signal::Sell => series.sell_signals.push(SignalPoint {
                x: label.clone(),
                y: record.portfolio_value,
            }),
            Signal::Hold => {}
        }
        series.labels.push(label);
    }

    series
}

pub fn build_sentiment_series(data: &[DailyRecord]) -> SentimentSeries {
    SentimentSeries {
        labels: data.iter().map(|r| format_chart_date(r.date)).collect(),
        sentiment: data.iter().map(|r| r.sentiment).collect(),
        price: data.iter().map(|r| r.price).collect(),
        sentiment_sign: data
            .iter()
            .map(|r| Classification::of_sentiment(r.sentiment))
            .collect(),
    }
}
