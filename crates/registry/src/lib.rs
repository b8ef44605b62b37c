//! In-memory step registry.
//!
//! [`StepRegistry`] owns the `uid -> Step` mapping and implements the
//! orchestration operations on top of the task-execution client: create,
//! status refresh, per-task cancel/rerun/completion, and deletion. The
//! remote service is the sole source of truth for execution progress;
//! the registry only tracks identity and the last observed local state.

pub mod error;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::StepRegistry;
