use thiserror::Error;

/// Error taxonomy for one request/render cycle.
///
/// Every variant is terminal for the current request (no automatic retry)
/// and carries a message suitable for direct display in the UI shell.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Bad request parameters, rejected before any network call.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Network failure, timeout, or a body that is not JSON at all.
    #[error("backend unreachable: {context}")]
    Transport {
        context: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Well-formed response with `success = false`; message is verbatim.
    #[error("{0}")]
    Backend(String),

    /// Response parsed as JSON but violates the data-model invariants.
    #[error("malformed backtest payload: {0}")]
    MalformedPayload(String),

    /// Non-finite numeric input to the metrics formatter.
    #[error("cannot format non-finite value {value} for {field}")]
    Format { field: &'static str, value: f64 },
}

impl DashboardError {
    pub fn transport<S: Into<String>>(context: S, source: Option<reqwest::Error>) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedPayload(message.into())
    }
}
