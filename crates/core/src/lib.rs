//! Domain types for the step orchestrator.
//!
//! A *step* is a logical unit of work tracked locally and backed by one
//! task group on the remote task-execution service. This crate holds the
//! shared vocabulary: step and remote state enums, the remote-to-local
//! state translation, the step record itself, and the domain errors.
//!
//! Deliberately a leaf crate with no internal dependencies.

pub mod error;
pub mod state;
pub mod step;
