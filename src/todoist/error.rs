//! Error types for Todoist API operations
//!
//! This module defines error types that can occur when calling the Todoist
//! API, including transport failures, non-success responses, and argument
//! guards tripped before any request is sent.

use thiserror::Error;

/// Errors that can occur when calling the Todoist API
#[derive(Error, Debug)]
pub enum TodoistError {
    /// The request could not be sent or the response could not be decoded
    #[error("request to Todoist failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Todoist answered with a non-success status
    #[error("Todoist API returned {status}: {body}")]
    Api {
        /// HTTP status of the response
        status: reqwest::StatusCode,
        /// Response body text, usually a short explanation from Todoist
        body: String,
    },

    /// An argument failed a handler-side guard before any request was made
    #[error("{0}")]
    InvalidArgument(String),
}

/// Result type alias for Todoist operations
pub type TodoistResult<T> = Result<T, TodoistError>;
