//! Todoist MCP Library
//!
//! Model Context Protocol server for Todoist task management.
//!
//! # Features
//!
//! - **Tasks**: create, list, update, complete, reopen, and delete tasks
//! - **Queries**: Todoist filter expressions like `today | overdue` or `#Work & @email`
//! - **Quick add**: natural-language task capture via the quick-add endpoint
//! - **Planning views**: daily and weekly markdown views served as MCP resources
//! - **Prompts**: `daily_planner` and `task_manager` templates embedding live views
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use todoist_mcp::{Config, TodoistMcpServer};
//!
//! let config = Config::from_env()?;
//! let server = TodoistMcpServer::new(&config)?;
//! // Serve via stdio or an in-memory transport
//! ```

pub mod config;
pub mod handlers;
pub mod params;
pub mod prompts;
pub mod server;
pub mod todoist;
pub mod types;
pub mod views;

// Re-export main server type
pub use server::TodoistMcpServer;

// Re-export configuration and parameter types for direct API usage
pub use config::Config;
pub use params::*;
