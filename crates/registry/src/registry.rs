//! The step registry and its public operations.

use std::collections::HashMap;
use std::sync::Arc;

use stepline_core::error::CoreError;
use stepline_core::state::StepState;
use stepline_core::step::{Step, StepUid, TaskGroupId, TaskId};
use stepline_taskexec::{TaskExecClient, TaskHandle};
use tokio::sync::RwLock;

use crate::error::RegistryResult;

/// Concurrency-safe in-memory mapping from step uid to [`Step`].
///
/// Created once at application startup and shared across request handlers
/// behind an `Arc`. All mutations of step records go through this type.
///
/// Lock discipline: the map guard is never held across a remote call.
/// Operations read what they need, drop the guard, await the
/// task-execution service, then re-acquire the guard and re-check that
/// the step still exists before writing, so a concurrent delete always
/// wins cleanly.
pub struct StepRegistry {
    steps: RwLock<HashMap<StepUid, Step>>,
    client: Arc<dyn TaskExecClient>,
}

impl StepRegistry {
    /// Create an empty registry backed by the given client.
    pub fn new(client: Arc<dyn TaskExecClient>) -> Self {
        Self {
            steps: RwLock::new(HashMap::new()),
            client,
        }
    }

    /// Return the uids of all known steps (order not significant).
    pub async fn list_steps(&self) -> Vec<StepUid> {
        tracing::info!("Listing steps");
        self.steps.read().await.keys().cloned().collect()
    }

    /// Create a step backed by a new task group built from `inputs`.
    ///
    /// The task group is created on the remote service first; the step is
    /// only registered (state `running`) once that call succeeds, so a
    /// remote failure leaves the registry untouched. An existing step
    /// with the same `uid` is replaced, not merged; callers are
    /// responsible for uid uniqueness.
    pub async fn create_step(
        &self,
        uid: &str,
        inputs: &serde_json::Value,
    ) -> RegistryResult<()> {
        tracing::info!(uid, "Creating step");
        let task_group_id = self.client.create_task_group(inputs).await?;

        let replaced = self
            .steps
            .write()
            .await
            .insert(uid.to_string(), Step::new(uid, task_group_id.clone()))
            .is_some();

        if replaced {
            tracing::warn!(uid, "Replaced existing step with the same uid");
        }
        tracing::info!(uid, task_group_id = %task_group_id, "Step created");
        Ok(())
    }

    /// Return the step record for `uid`.
    pub async fn get_step(&self, uid: &str) -> RegistryResult<Step> {
        tracing::info!(uid, "Getting step");
        let steps = self.steps.read().await;
        steps.get(uid).cloned().ok_or_else(|| step_not_found(uid))
    }

    /// Refresh and return the step's local state from the remote system.
    ///
    /// Fetches the task group's aggregate state, translates it into the
    /// local vocabulary, and stores the refreshed value on the step. If
    /// the step was deleted while the remote call was in flight the
    /// refresh is discarded and `NotFound` is returned.
    pub async fn get_step_status(&self, uid: &str) -> RegistryResult<StepState> {
        tracing::info!(uid, "Getting step status");
        let task_group_id = self.task_group_id(uid).await?;

        let remote = self.client.get_task_group_state(&task_group_id).await?;
        let state = StepState::from(remote);

        let mut steps = self.steps.write().await;
        match steps.get_mut(uid) {
            Some(step) => {
                step.state = state;
                tracing::debug!(uid, remote = %remote, state = %state, "Step state refreshed");
                Ok(state)
            }
            None => Err(step_not_found(uid)),
        }
    }

    /// Request cancellation of the step's entire task group.
    ///
    /// Local state is not touched; the next status refresh observes the
    /// remote cancellation.
    pub async fn cancel_task_group(&self, uid: &str) -> RegistryResult<()> {
        tracing::info!(uid, "Cancelling task group");
        let task_group_id = self.task_group_id(uid).await?;
        self.client.cancel_task_group(&task_group_id).await?;
        Ok(())
    }

    /// Request cancellation of a single task inside the step's group.
    pub async fn cancel_task(&self, uid: &str, task_id: &str) -> RegistryResult<()> {
        tracing::info!(uid, task_id, "Cancelling task");
        let task = self.resolve_task(uid, task_id).await?;
        self.client.cancel_task(&task.task_id).await?;
        Ok(())
    }

    /// Request a rerun of a single task inside the step's group.
    ///
    /// The step's local state is reset to `running` as soon as the task
    /// resolves, ahead of the rerun confirmation and the next remote
    /// poll. The eager reset is always safe: the next status refresh
    /// reconciles with the remote truth either way.
    pub async fn rerun_task(&self, uid: &str, task_id: &str) -> RegistryResult<()> {
        tracing::info!(uid, task_id, "Rerunning task");
        let task = self.resolve_task(uid, task_id).await?;

        {
            let mut steps = self.steps.write().await;
            match steps.get_mut(uid) {
                Some(step) => step.state = StepState::Running,
                None => return Err(step_not_found(uid)),
            }
        }

        self.client.rerun_task(&task.task_id).await?;
        Ok(())
    }

    /// Forward a completion report for a single task.
    ///
    /// Local state is not touched; the next status refresh reflects the
    /// now-possibly-advanced group state.
    pub async fn report_task_complete(&self, uid: &str, task_id: &str) -> RegistryResult<()> {
        tracing::info!(uid, task_id, "Reporting task completed");
        let task = self.resolve_task(uid, task_id).await?;
        self.client.report_task_completed(&task.task_id).await?;
        Ok(())
    }

    /// Cancel the step's task group and remove the step from the registry.
    ///
    /// The cancellation must succeed before the record is removed; on a
    /// remote failure the step stays addressable so the delete can be
    /// retried.
    pub async fn delete_step(&self, uid: &str) -> RegistryResult<()> {
        tracing::info!(uid, "Deleting step");
        let task_group_id = self.task_group_id(uid).await?;
        self.client.cancel_task_group(&task_group_id).await?;

        if self.steps.write().await.remove(uid).is_none() {
            // Raced with another delete; the step is gone either way.
            tracing::debug!(uid, "Step already removed");
        }
        Ok(())
    }

    // ---- private helpers ----

    /// Look up the step's task group id without holding the lock past
    /// the lookup.
    async fn task_group_id(&self, uid: &str) -> RegistryResult<TaskGroupId> {
        let steps = self.steps.read().await;
        steps
            .get(uid)
            .map(|step| step.task_group_id.clone())
            .ok_or_else(|| step_not_found(uid))
    }

    /// Resolve `task_id` inside the step's task group via the client.
    ///
    /// Distinguishes the two not-found cases: an unknown `uid` never
    /// reaches the remote service, and a task the service cannot find in
    /// the group yields its own error.
    async fn resolve_task(&self, uid: &str, task_id: &str) -> RegistryResult<TaskHandle> {
        let task_group_id = self.task_group_id(uid).await?;

        match self.client.get_task(&task_group_id, &task_id.to_string()).await? {
            Some(task) => Ok(task),
            None => Err(CoreError::TaskNotFound {
                uid: uid.to_string(),
                task_id: task_id.to_string(),
            }
            .into()),
        }
    }
}

fn step_not_found(uid: &str) -> crate::error::RegistryError {
    CoreError::StepNotFound {
        uid: uid.to_string(),
    }
    .into()
}
