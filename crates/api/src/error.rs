use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stepline_core::error::CoreError;
use stepline_registry::RegistryError;
use stepline_taskexec::TaskExecError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`RegistryError`] and implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An error from the step registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Registry(registry) = self;
        let (status, code, message) = match &registry {
            // Domain lookups: the message strings identify the missing
            // uid/task and go to the caller verbatim.
            RegistryError::Core(core) => match core {
                CoreError::StepNotFound { .. } | CoreError::TaskNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
            },

            // An unmapped remote state is an integration defect, not a
            // remote outage; give it its own code so it is never read as
            // a transient failure.
            RegistryError::Remote(TaskExecError::UnknownState { value }) => {
                tracing::error!(value = %value, "Remote state has no local mapping");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Remote state has no local mapping".to_string(),
                )
            }

            // Everything else the task-execution service surfaced.
            RegistryError::Remote(err) => {
                tracing::error!(error = %err, "Task execution service call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "REMOTE_FAILURE",
                    "Task execution service request failed".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
