//! HTTP dispatch layer for the step registry.
//!
//! A deliberately thin Axum surface: each route maps 1:1 to one registry
//! operation, registry results map to status codes, and nothing else
//! lives here. The registry and the task-execution client do the actual
//! work.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
