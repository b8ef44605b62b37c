//! Step and task-group state vocabularies and the translation between them.
//!
//! The remote task-execution service reports a richer vocabulary than the
//! registry tracks locally. [`StepState::from`] collapses every remote
//! value into exactly one local value; the match is total over the closed
//! [`RemoteState`] enum, so an unmapped remote state cannot exist past the
//! parse boundary in [`RemoteState::parse`].

use serde::{Deserialize, Serialize};

/// Local lifecycle state of a step.
///
/// `Running` is entered on creation and on task rerun; `Completed` and
/// `Cancelled` are only ever observed from the remote system during a
/// status refresh, never inferred locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Running,
    Completed,
    Cancelled,
}

impl StepState {
    /// Wire/display name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            StepState::Running => "running",
            StepState::Completed => "completed",
            StepState::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate state of a task group as reported by the task-execution
/// service.
///
/// This is the full vocabulary the service can report. Adding a variant
/// here forces the translation in [`StepState::from`] to be extended,
/// keeping the mapping total by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    Unscheduled,
    Pending,
    Running,
    Completed,
    Failed,
    Exception,
}

impl RemoteState {
    /// Parse a remote state string.
    ///
    /// Returns `None` for vocabulary this build does not know about. The
    /// caller must treat that as an integration defect and fail loudly,
    /// not fall back to a guessed local state.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unscheduled" => Some(RemoteState::Unscheduled),
            "pending" => Some(RemoteState::Pending),
            "running" => Some(RemoteState::Running),
            "completed" => Some(RemoteState::Completed),
            "failed" => Some(RemoteState::Failed),
            "exception" => Some(RemoteState::Exception),
            _ => None,
        }
    }

    /// Wire/display name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteState::Unscheduled => "unscheduled",
            RemoteState::Pending => "pending",
            RemoteState::Running => "running",
            RemoteState::Completed => "completed",
            RemoteState::Failed => "failed",
            RemoteState::Exception => "exception",
        }
    }
}

impl std::fmt::Display for RemoteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RemoteState> for StepState {
    /// Translate a remote task-group state into the local step state.
    ///
    /// Anything still moving maps to `Running`. `Failed` and `Exception`
    /// map to `Cancelled`: the group is no longer making progress and did
    /// not complete, which is the only thing the local vocabulary can say
    /// about it.
    fn from(remote: RemoteState) -> Self {
        match remote {
            RemoteState::Unscheduled | RemoteState::Pending | RemoteState::Running => {
                StepState::Running
            }
            RemoteState::Completed => StepState::Completed,
            RemoteState::Failed | RemoteState::Exception => StepState::Cancelled,
        }
    }
}
