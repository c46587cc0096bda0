use crate::error::DashboardError;
use crate::models::Metrics;
use std::fmt;

/// Display classification used by the UI shell for gain/loss styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Positive,
    Negative,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Positive => "positive",
            Classification::Negative => "negative",
        }
    }

    /// Zero counts as a gain for return-style metrics.
    pub fn of_return(value: f64) -> Self {
        if value >= 0.0 {
            Classification::Positive
        } else {
            Classification::Negative
        }
    }

    /// Strictly-greater-than-zero rule used for sentiment coloring.
    pub fn of_sentiment(value: f64) -> Self {
        if value > 0.0 {
            Classification::Positive
        } else {
            Classification::Negative
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display string paired with its gain/loss classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedValue {
    pub text: String,
    pub class: Classification,
}

/// Display-ready metric cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMetrics {
    pub strategy_return: ClassifiedValue,
    pub buy_hold_return: ClassifiedValue,
    pub outperformance: ClassifiedValue,
    pub strategy_sharpe: String,
    pub max_drawdown: ClassifiedValue,
    pub win_rate: String,
    pub total_trades: String,
    pub final_portfolio_value: String,
}

/// Turns raw metrics into display strings and classes. Pure: equal input
/// yields equal output and nothing is mutated.
pub fn format_metrics(metrics: &Metrics) -> Result<FormattedMetrics, DashboardError> {
    Ok(FormattedMetrics {
        strategy_return: ClassifiedValue {
            text: format_percent("strategy_return", metrics.strategy_return)?,
            class: Classification::of_return(metrics.strategy_return),
        },
        buy_hold_return: ClassifiedValue {
            text: format_percent("buy_hold_return", metrics.buy_hold_return)?,
            class: Classification::of_return(metrics.buy_hold_return),
        },
        outperformance: ClassifiedValue {
            text: format_percent("outperformance", metrics.outperformance)?,
            class: Classification::of_return(metrics.outperformance),
        },
        strategy_sharpe: format_number("strategy_sharpe", metrics.strategy_sharpe)?,
        max_drawdown: ClassifiedValue {
            text: format_percent("max_drawdown", metrics.max_drawdown)?,
            // Drawdowns are never styled as gains, even at exactly 0.
            class: Classification::Negative,
        },
        win_rate: format_percent("win_rate", metrics.win_rate)?,
        total_trades: metrics.total_trades.to_string(),
        final_portfolio_value: format_currency(
            "final_portfolio_value",
            metrics.final_portfolio_value,
        )?,
    })
}

/// `0.0534` -> `"5.34%"`. Non-finite input is an error, never `"NaN%"`.
pub fn format_percent(field: &'static str, value: f64) -> Result<String, DashboardError> {
    require_finite(field, value)?;
    Ok(format!("{:.2}%", value * 100.0))
}

/// Plain number with two fractional digits.
pub fn format_number(field: &'static str, value: f64) -> Result<String, DashboardError> {
    require_finite(field, value)?;
    Ok(format!("{:.2}", value))
}

/// `1234567.891` -> `"$1,234,567.89"` (en-US grouping, two fractional digits).
pub fn format_currency(field: &'static str, value: f64) -> Result<String, DashboardError> {
    require_finite(field, value)?;
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed
        .split_once('.')
        .unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    Ok(format!(
        "{}${}.{}",
        sign,
        group_thousands(integer),
        fraction
    ))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn require_finite(field: &'static str, value: f64) -> Result<(), DashboardError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DashboardError::Format { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> Metrics {
        Metrics {
            strategy_return: -0.0534,
            buy_hold_return: 0.021,
            outperformance: -0.0744,
            strategy_sharpe: 1.2345,
            max_drawdown: -0.182,
            win_rate: 0.5,
            total_trades: 12,
            final_portfolio_value: 1_234_567.891,
        }
    }

    #[test]
    fn formats_negative_return_with_class() {
        let formatted = format_metrics(&sample_metrics()).unwrap();
        assert_eq!(formatted.strategy_return.text, "-5.34%");
        assert_eq!(formatted.strategy_return.class, Classification::Negative);
        assert_eq!(formatted.buy_hold_return.class, Classification::Positive);
    }

    #[test]
    fn zero_return_is_positive_but_zero_drawdown_stays_negative() {
        let mut metrics = sample_metrics();
        metrics.strategy_return = 0.0;
        metrics.max_drawdown = 0.0;
        let formatted = format_metrics(&metrics).unwrap();
        assert_eq!(formatted.strategy_return.class, Classification::Positive);
        assert_eq!(formatted.max_drawdown.text, "0.00%");
        assert_eq!(formatted.max_drawdown.class, Classification::Negative);
    }

    #[test]
    fn currency_groups_thousands() {
        let formatted = format_metrics(&sample_metrics()).unwrap();
        assert_eq!(formatted.final_portfolio_value, "$1,234,567.89");
        assert_eq!(format_currency("x", 0.0).unwrap(), "$0.00");
        assert_eq!(format_currency("x", 999.999).unwrap(), "$1,000.00");
        assert_eq!(format_currency("x", -4521.5).unwrap(), "-$4,521.50");
        assert_eq!(
            format_currency("x", 12_000_000_000.0).unwrap(),
            "$12,000,000,000.00"
        );
    }

    #[test]
    fn sharpe_and_trade_count_render_plainly() {
        let formatted = format_metrics(&sample_metrics()).unwrap();
        assert_eq!(formatted.strategy_sharpe, "1.23");
        assert_eq!(formatted.total_trades, "12");
        assert_eq!(formatted.win_rate, "50.00%");
    }

    #[test]
    fn non_finite_input_is_a_format_error() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut metrics = sample_metrics();
            metrics.win_rate = bad;
            let err = format_metrics(&metrics).unwrap_err();
            assert!(matches!(
                err,
                DashboardError::Format {
                    field: "win_rate",
                    ..
                }
            ));
        }
    }

    #[test]
    fn formatting_is_idempotent_and_pure() {
        let metrics = sample_metrics();
        let first = format_metrics(&metrics).unwrap();
        let second = format_metrics(&metrics).unwrap();
        assert_eq!(first, second);
        assert_eq!(metrics, sample_metrics());
    }
}
