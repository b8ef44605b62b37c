//! The step record tracked by the registry.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::StepState;

/// Caller-supplied step identifier, unique among live steps.
pub type StepUid = String;

/// Opaque task-group identifier assigned by the task-execution service.
pub type TaskGroupId = String;

/// Identifier of a single task, scoped to its owning task group.
pub type TaskId = String;

/// A logical unit of work backed by one remote task group.
///
/// Owned exclusively by the registry; `state` is only ever mutated through
/// registry operations and `task_group_id` is immutable once set.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Caller-supplied identifier (registry key).
    pub uid: StepUid,
    /// Local lifecycle state, refreshed from the remote system on read.
    pub state: StepState,
    /// Remote task group backing this step.
    #[serde(rename = "taskGroupId")]
    pub task_group_id: TaskGroupId,
    /// When the step was registered locally.
    pub created_at: DateTime<Utc>,
}

impl Step {
    /// Build a freshly created step.
    ///
    /// New steps always start out `running`; the task group was confirmed
    /// created by the remote service before this is called.
    pub fn new(uid: impl Into<StepUid>, task_group_id: impl Into<TaskGroupId>) -> Self {
        Self {
            uid: uid.into(),
            state: StepState::Running,
            task_group_id: task_group_id.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_step_starts_running() {
        let step = Step::new("s1", "g1");
        assert_eq!(step.state, StepState::Running);
        assert_eq!(step.uid, "s1");
        assert_eq!(step.task_group_id, "g1");
    }

    #[test]
    fn step_serializes_camel_case_group_id() {
        let step = Step::new("s1", "g1");
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["taskGroupId"], "g1");
        assert_eq!(json["state"], "running");
    }
}
