//! Route definitions for the step orchestration endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::steps;
use crate::state::AppState;

/// Step routes mounted at `/steps`.
///
/// ```text
/// GET    /steps                                -> list_steps
/// PUT    /steps/{uid}                          -> create_step
/// GET    /steps/{uid}                          -> get_step
/// GET    /steps/{uid}/status                   -> get_step_status
/// DELETE /steps/{uid}                          -> delete_step
/// POST   /steps/{uid}/cancel                   -> cancel_task_group
/// POST   /steps/{uid}/tasks/{task_id}/cancel   -> cancel_task
/// POST   /steps/{uid}/tasks/{task_id}/rerun    -> rerun_task
/// POST   /steps/{uid}/tasks/{task_id}/complete -> report_task_complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/steps", get(steps::list_steps))
        .route(
            "/steps/{uid}",
            put(steps::create_step)
                .get(steps::get_step)
                .delete(steps::delete_step),
        )
        .route("/steps/{uid}/status", get(steps::get_step_status))
        .route("/steps/{uid}/cancel", post(steps::cancel_task_group))
        .route(
            "/steps/{uid}/tasks/{task_id}/cancel",
            post(steps::cancel_task),
        )
        .route(
            "/steps/{uid}/tasks/{task_id}/rerun",
            post(steps::rerun_task),
        )
        .route(
            "/steps/{uid}/tasks/{task_id}/complete",
            post(steps::report_task_complete),
        )
}
