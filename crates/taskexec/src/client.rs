//! The task-execution client contract consumed by the step registry.

use async_trait::async_trait;
use stepline_core::state::RemoteState;
use stepline_core::step::{TaskGroupId, TaskId};

use crate::error::TaskExecError;

/// Handle to a single task resolved inside a task group.
///
/// Tasks are never stored locally; a handle only proves the task exists
/// on the remote side at the time of the lookup.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    /// Identifier of the task, scoped to its group.
    pub task_id: TaskId,
    /// Remote state of the task at lookup time.
    pub state: RemoteState,
}

/// Remote primitives of the task-execution service.
///
/// All execution progress lives on the remote side; the registry calls
/// through this trait for every create, status, cancel, rerun, and
/// completion-report operation. Implementations must be safe to share
/// across request handlers.
#[async_trait]
pub trait TaskExecClient: Send + Sync {
    /// Create a task group from arbitrary structured task definitions.
    ///
    /// Returns the identifier of the newly created group. A step is only
    /// registered locally after this succeeds.
    async fn create_task_group(
        &self,
        inputs: &serde_json::Value,
    ) -> Result<TaskGroupId, TaskExecError>;

    /// Fetch the aggregate state of a task group.
    async fn get_task_group_state(
        &self,
        task_group_id: &TaskGroupId,
    ) -> Result<RemoteState, TaskExecError>;

    /// Resolve a single task inside a group.
    ///
    /// Returns `Ok(None)` when the service reports no such task in the
    /// group; transport and API failures stay in `Err`.
    async fn get_task(
        &self,
        task_group_id: &TaskGroupId,
        task_id: &TaskId,
    ) -> Result<Option<TaskHandle>, TaskExecError>;

    /// Request cancellation of an entire task group.
    async fn cancel_task_group(&self, task_group_id: &TaskGroupId) -> Result<(), TaskExecError>;

    /// Request cancellation of a single task.
    async fn cancel_task(&self, task_id: &TaskId) -> Result<(), TaskExecError>;

    /// Request a rerun of a single task.
    async fn rerun_task(&self, task_id: &TaskId) -> Result<(), TaskExecError>;

    /// Report a task as completed on the caller's behalf.
    async fn report_task_completed(&self, task_id: &TaskId) -> Result<(), TaskExecError>;
}
