//! Errors from the task-execution service client.

/// Errors surfaced by [`crate::TaskExecClient`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum TaskExecError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("task execution service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service reported a state value this build has no mapping for.
    ///
    /// This is an integration defect, not a runtime condition to recover
    /// from: the request must fail loudly rather than guess a local state.
    #[error("remote state {value:?} has no local mapping")]
    UnknownState {
        /// The unmapped state string as received.
        value: String,
    },
}
