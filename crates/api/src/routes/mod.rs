pub mod health;
pub mod steps;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /steps    step orchestration (see routes::steps)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(steps::router())
}
