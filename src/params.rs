//! Parameter definitions for todoist-mcp tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Task CRUD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    /// Task title, e.g. "Buy milk"
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    /// Parent task id, for creating a subtask
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Position among siblings (smallest first)
    #[serde(default)]
    pub order: Option<i32>,
    /// Label names to attach
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Priority from 1 (normal) to 4 (urgent)
    #[serde(default)]
    #[schemars(range(min = 1, max = 4))]
    pub priority: Option<u8>,
    /// Natural-language due date, e.g. "next monday at 9am"
    #[serde(default)]
    pub due_string: Option<String>,
    /// Due date in YYYY-MM-DD format
    #[serde(default)]
    pub due_date: Option<String>,
    /// Due date and time in RFC 3339 format
    #[serde(default)]
    pub due_datetime: Option<String>,
    /// Two-letter language code for parsing due_string
    #[serde(default)]
    pub due_lang: Option<String>,
    /// User to assign the task to, for shared projects
    #[serde(default)]
    pub assignee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(length(min = 1))]
    pub task_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Label names; replaces the existing set
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Priority from 1 (normal) to 4 (urgent)
    #[serde(default)]
    #[schemars(range(min = 1, max = 4))]
    pub priority: Option<u8>,
    #[serde(default)]
    pub due_string: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_datetime: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CloseTaskParams {
    #[schemars(length(min = 1))]
    pub task_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReopenTaskParams {
    #[schemars(length(min = 1))]
    pub task_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTaskParams {
    #[schemars(length(min = 1))]
    pub task_id: String,
}

// ============================================================================
// Task Queries
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetTasksParams {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    /// Label name to filter by
    #[serde(default)]
    pub label: Option<String>,
    /// Specific task ids to fetch in one batch
    #[serde(default)]
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetTasksByFilterParams {
    /// Todoist filter expression, e.g. "today | overdue" or "#Work & @email"
    #[schemars(length(min = 1, max = 1024))]
    pub filter: String,
    /// Two-letter language code for date words inside the filter
    #[serde(default)]
    pub lang: Option<String>,
}

// ============================================================================
// Quick Add
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuickAddTaskParams {
    /// Task text in Todoist quick-add syntax, e.g. "Call mom tomorrow 5pm #Family p2"
    pub text: String,
    /// Note to attach to the created task
    #[serde(default)]
    pub note: Option<String>,
    /// Reminder in natural language
    #[serde(default)]
    pub reminder: Option<String>,
    /// Let Todoist add its default reminder to due times
    #[serde(default)]
    pub auto_reminder: Option<bool>,
}
