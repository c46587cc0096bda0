use crate::models::{DailyRecord, Signal};
use chrono::NaiveDate;

pub const DEFAULT_LEDGER_LIMIT: usize = 10;

/// One executed trade in the recent-trades table.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub date: NaiveDate,
    /// Always `Buy` or `Sell`; hold days never become trades.
    pub action: Signal,
    pub price: f64,
    pub shares: f64,
    /// `price * shares` from the raw numerics, never from display strings.
    pub amount: f64,
    pub sentiment: f64,
}

/// Filters the record sequence down to BUY/SELL days, keeps the last `limit`
/// in chronological order, and reverses them so the most recent trade is
/// first. `limit = 0` yields an empty ledger.
pub fn extract_ledger(data: &[DailyRecord], limit: usize) -> Vec<TradeRow> {
    let trades: Vec<&DailyRecord> = data.iter().filter(|r| r.signal.is_trade()).collect();
    let start = trades.len().saturating_sub(limit);
    trades[start..]
        .iter()
        .rev()
        .map(|record| TradeRow {
            date: record.date,
            action: record.signal,
            price: record.price,
            shares: record.holdings,
            amount: record.price * record.holdings,
            sentiment: record.sentiment,
        })
        .collect()
}
