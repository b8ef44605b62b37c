//! Registry-level error type.

use stepline_core::error::CoreError;
use stepline_taskexec::TaskExecError;

/// Errors returned by [`crate::StepRegistry`] operations.
///
/// Domain lookups (`Core`) and remote failures (`Remote`) are kept apart
/// so the dispatch layer can map them to different response classes.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A domain error: the addressed step or task does not exist.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The task-execution service call failed; propagated without retry
    /// or suppression.
    #[error("task execution service call failed: {0}")]
    Remote(#[from] TaskExecError),
}

/// Convenience alias for registry operation results.
pub type RegistryResult<T> = Result<T, RegistryError>;
