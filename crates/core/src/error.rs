//! Domain errors shared across the workspace.

use crate::step::{StepUid, TaskId};

/// Errors raised by registry lookups.
///
/// These are ordinary failure results for the dispatch layer to turn into
/// not-found responses, not process-aborting conditions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed step does not exist in the registry.
    #[error("Step with uid {uid} unknown")]
    StepNotFound {
        /// The missing step identifier.
        uid: StepUid,
    },

    /// The task-execution service has no such task inside the step's
    /// task group.
    #[error("Task {task_id} not found in task group for step {uid}")]
    TaskNotFound {
        /// The owning step identifier.
        uid: StepUid,
        /// The missing task identifier.
        task_id: TaskId,
    },
}
