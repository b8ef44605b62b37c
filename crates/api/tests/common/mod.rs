#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use stepline_api::config::ServerConfig;
use stepline_api::router::build_app_router;
use stepline_api::state::AppState;
use stepline_core::state::RemoteState;
use stepline_core::step::{TaskGroupId, TaskId};
use stepline_registry::StepRegistry;
use stepline_taskexec::{TaskExecClient, TaskExecError, TaskHandle};

/// Scripted task-execution client backing API tests.
///
/// Group creation always succeeds with a fresh `g<n>` id; the group state
/// and the set of resolvable tasks are settable per test.
pub struct MockTaskExec {
    group_state: Mutex<Result<RemoteState, String>>,
    known_tasks: Mutex<Vec<String>>,
    created: Mutex<u32>,
}

impl MockTaskExec {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            group_state: Mutex::new(Ok(RemoteState::Pending)),
            known_tasks: Mutex::new(vec!["t1".to_string()]),
            created: Mutex::new(0),
        })
    }

    /// Script the group state returned by the next status refreshes.
    pub fn set_group_state(&self, state: RemoteState) {
        *self.group_state.lock().unwrap() = Ok(state);
    }

    /// Script an unmapped remote state value.
    pub fn set_unknown_group_state(&self, value: &str) {
        *self.group_state.lock().unwrap() = Err(value.to_string());
    }
}

#[async_trait]
impl TaskExecClient for MockTaskExec {
    async fn create_task_group(
        &self,
        _inputs: &serde_json::Value,
    ) -> Result<TaskGroupId, TaskExecError> {
        let mut created = self.created.lock().unwrap();
        *created += 1;
        Ok(format!("g{created}"))
    }

    async fn get_task_group_state(
        &self,
        _task_group_id: &TaskGroupId,
    ) -> Result<RemoteState, TaskExecError> {
        self.group_state
            .lock()
            .unwrap()
            .clone()
            .map_err(|value| TaskExecError::UnknownState { value })
    }

    async fn get_task(
        &self,
        _task_group_id: &TaskGroupId,
        task_id: &TaskId,
    ) -> Result<Option<TaskHandle>, TaskExecError> {
        let known = self.known_tasks.lock().unwrap().contains(task_id);
        Ok(known.then(|| TaskHandle {
            task_id: task_id.clone(),
            state: RemoteState::Running,
        }))
    }

    async fn cancel_task_group(&self, _task_group_id: &TaskGroupId) -> Result<(), TaskExecError> {
        Ok(())
    }

    async fn cancel_task(&self, _task_id: &TaskId) -> Result<(), TaskExecError> {
        Ok(())
    }

    async fn rerun_task(&self, _task_id: &TaskId) -> Result<(), TaskExecError> {
        Ok(())
    }

    async fn report_task_completed(&self, _task_id: &TaskId) -> Result<(), TaskExecError> {
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        taskexec_url: "http://localhost:4040".to_string(),
        taskexec_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, backed
/// by the given mock client.
///
/// This goes through the same [`build_app_router`] as `main.rs`, so the
/// tests exercise the production middleware stack.
pub fn build_test_app(client: Arc<MockTaskExec>) -> Router {
    let config = test_config();
    let state = AppState {
        registry: Arc::new(StepRegistry::new(client)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a bodyless POST request.
pub async fn post(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert an empty-success response.
pub fn assert_no_content(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
