//! Client library for the remote task-execution service.
//!
//! Provides the [`client::TaskExecClient`] trait consumed by the step
//! registry and [`api::TaskExecApi`], the production HTTP implementation
//! over the service's REST API.

pub mod api;
pub mod client;
pub mod error;

pub use api::TaskExecApi;
pub use client::{TaskExecClient, TaskHandle};
pub use error::TaskExecError;
