//! REST API client for the task-execution service HTTP endpoints.
//!
//! Wraps the service's HTTP API (group creation, state queries, task
//! lookup, cancellation, rerun, completion reporting) using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use stepline_core::state::RemoteState;
use stepline_core::step::{TaskGroupId, TaskId};

use crate::client::{TaskExecClient, TaskHandle};
use crate::error::TaskExecError;

/// Default bound on any single remote call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a task-execution service instance.
pub struct TaskExecApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by `GET /task-groups/{id}/state`.
#[derive(Debug, Deserialize)]
struct GroupStateResponse {
    /// Aggregate group state in the service's own vocabulary.
    state: String,
}

/// Response returned by `GET /task-groups/{id}/tasks/{task_id}`.
#[derive(Debug, Deserialize)]
struct TaskResponse {
    task_id: String,
    state: String,
}

impl TaskExecApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:4040`.
    /// * `timeout` - Per-request bound; every remote call fails rather
    ///   than waits past it.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, TaskExecError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`TaskExecError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TaskExecError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TaskExecError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TaskExecError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), TaskExecError> {
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Parse a remote state string, rejecting unknown vocabulary.
    fn parse_state(value: &str) -> Result<RemoteState, TaskExecError> {
        RemoteState::parse(value).ok_or_else(|| TaskExecError::UnknownState {
            value: value.to_string(),
        })
    }
}

#[async_trait]
impl TaskExecClient for TaskExecApi {
    /// Create a task group via `POST /task-groups`.
    ///
    /// The group identifier is generated client-side (slug convention of
    /// the service) and submitted together with the task definitions.
    async fn create_task_group(
        &self,
        inputs: &serde_json::Value,
    ) -> Result<TaskGroupId, TaskExecError> {
        let task_group_id = uuid::Uuid::new_v4().to_string();
        let body = serde_json::json!({
            "task_group_id": task_group_id,
            "tasks": inputs,
        });

        let response = self
            .client
            .post(format!("{}/task-groups", self.base_url))
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        tracing::debug!(task_group_id = %task_group_id, "Task group created");
        Ok(task_group_id)
    }

    /// Fetch the aggregate group state via `GET /task-groups/{id}/state`.
    async fn get_task_group_state(
        &self,
        task_group_id: &TaskGroupId,
    ) -> Result<RemoteState, TaskExecError> {
        let response = self
            .client
            .get(format!(
                "{}/task-groups/{}/state",
                self.base_url, task_group_id
            ))
            .send()
            .await?;

        let parsed: GroupStateResponse = Self::parse_response(response).await?;
        Self::parse_state(&parsed.state)
    }

    /// Resolve a task via `GET /task-groups/{id}/tasks/{task_id}`.
    ///
    /// A 404 from the service means the task does not exist in the group
    /// and maps to `Ok(None)`.
    async fn get_task(
        &self,
        task_group_id: &TaskGroupId,
        task_id: &TaskId,
    ) -> Result<Option<TaskHandle>, TaskExecError> {
        let response = self
            .client
            .get(format!(
                "{}/task-groups/{}/tasks/{}",
                self.base_url, task_group_id, task_id
            ))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let parsed: TaskResponse = Self::parse_response(response).await?;
        Ok(Some(TaskHandle {
            task_id: parsed.task_id,
            state: Self::parse_state(&parsed.state)?,
        }))
    }

    /// Cancel an entire group via `POST /task-groups/{id}/cancel`.
    async fn cancel_task_group(&self, task_group_id: &TaskGroupId) -> Result<(), TaskExecError> {
        let response = self
            .client
            .post(format!(
                "{}/task-groups/{}/cancel",
                self.base_url, task_group_id
            ))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Cancel a single task via `POST /tasks/{task_id}/cancel`.
    async fn cancel_task(&self, task_id: &TaskId) -> Result<(), TaskExecError> {
        let response = self
            .client
            .post(format!("{}/tasks/{}/cancel", self.base_url, task_id))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Rerun a single task via `POST /tasks/{task_id}/rerun`.
    async fn rerun_task(&self, task_id: &TaskId) -> Result<(), TaskExecError> {
        let response = self
            .client
            .post(format!("{}/tasks/{}/rerun", self.base_url, task_id))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Report a task completed via `POST /tasks/{task_id}/complete`.
    async fn report_task_completed(&self, task_id: &TaskId) -> Result<(), TaskExecError> {
        let response = self
            .client
            .post(format!("{}/tasks/{}/complete", self.base_url, task_id))
            .send()
            .await?;

        Self::check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_state_response_deserializes() {
        let parsed: GroupStateResponse =
            serde_json::from_str(r#"{"state": "running"}"#).unwrap();
        assert_eq!(parsed.state, "running");
    }

    #[test]
    fn task_response_deserializes() {
        let parsed: TaskResponse =
            serde_json::from_str(r#"{"task_id": "t1", "state": "pending", "extra": 1}"#).unwrap();
        assert_eq!(parsed.task_id, "t1");
        assert_eq!(parsed.state, "pending");
    }

    #[test]
    fn parse_state_rejects_unknown_vocabulary() {
        let err = TaskExecApi::parse_state("sleeping").unwrap_err();
        assert!(matches!(err, TaskExecError::UnknownState { value } if value == "sleeping"));
        assert_eq!(
            TaskExecApi::parse_state("exception").unwrap(),
            RemoteState::Exception
        );
    }
}
