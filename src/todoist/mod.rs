//! Todoist API client module
//!
//! This module provides a thin, stateless facade over the Todoist REST v2
//! API plus the Sync v9 quick-add endpoint.

pub mod client;
pub mod error;

pub use client::{NewTask, QuickAdd, TaskQuery, TaskUpdate, TodoistClient};
pub use error::{TodoistError, TodoistResult};
