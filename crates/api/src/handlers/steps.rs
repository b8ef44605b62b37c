//! Handlers for the step orchestration endpoints.
//!
//! Each handler is a 1:1 translation of one registry operation: path
//! parameters in, registry result out. Unit results become 204 No
//! Content; lookup failures become 404 via [`crate::error::AppError`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use stepline_core::state::StepState;
use stepline_core::step::{Step, StepUid};

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /steps/{uid}`.
#[derive(Debug, Serialize)]
pub struct StepResponse {
    /// The step identifier.
    pub uid: StepUid,
    /// Echo of the declared input (always empty; inputs are not stored).
    pub input: serde_json::Value,
    /// The step record.
    pub parameters: Step,
}

/// Response body for `GET /steps/{uid}/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// The step's refreshed local state.
    pub state: StepState,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /steps
///
/// List the uids of all known steps.
pub async fn list_steps(State(state): State<AppState>) -> Json<Vec<StepUid>> {
    Json(state.registry.list_steps().await)
}

/// PUT /steps/{uid}
///
/// Create a step from the task definitions in the request body. Replaces
/// any existing step with the same uid.
pub async fn create_step(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(inputs): Json<serde_json::Value>,
) -> AppResult<StatusCode> {
    state.registry.create_step(&uid, &inputs).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /steps/{uid}
///
/// Return the step's identifying data and record.
pub async fn get_step(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<StepResponse>> {
    let step = state.registry.get_step(&uid).await?;
    Ok(Json(StepResponse {
        uid: step.uid.clone(),
        input: serde_json::json!({}),
        parameters: step,
    }))
}

/// GET /steps/{uid}/status
///
/// Refresh the step's state from the remote system and return it.
pub async fn get_step_status(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let step_state = state.registry.get_step_status(&uid).await?;
    Ok(Json(StatusResponse { state: step_state }))
}

/// DELETE /steps/{uid}
///
/// Cancel the step's task group and remove it from the registry.
pub async fn delete_step(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<StatusCode> {
    state.registry.delete_step(&uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /steps/{uid}/cancel
///
/// Request cancellation of the step's entire task group.
pub async fn cancel_task_group(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<StatusCode> {
    state.registry.cancel_task_group(&uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /steps/{uid}/tasks/{task_id}/cancel
///
/// Request cancellation of a single task inside the step's group.
pub async fn cancel_task(
    State(state): State<AppState>,
    Path((uid, task_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.registry.cancel_task(&uid, &task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /steps/{uid}/tasks/{task_id}/rerun
///
/// Request a rerun of a single task; the step goes back to `running`.
pub async fn rerun_task(
    State(state): State<AppState>,
    Path((uid, task_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.registry.rerun_task(&uid, &task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /steps/{uid}/tasks/{task_id}/complete
///
/// Forward a completion report for a single task.
pub async fn report_task_complete(
    State(state): State<AppState>,
    Path((uid, task_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.registry.report_task_complete(&uid, &task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
