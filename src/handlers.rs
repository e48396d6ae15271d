//! Handler implementations for todoist-mcp tools
//!
//! Each handler converts MCP params to client argument types, calls the
//! Todoist client, and renders the result as display text. Handlers never
//! swallow errors; `into_envelope` is the single point where any failure
//! becomes a user-visible error result.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use tracing::warn;

use crate::params::*;
use crate::todoist::{NewTask, QuickAdd, TaskQuery, TaskUpdate, TodoistClient, TodoistError, TodoistResult};
use crate::types::Task;

/// Normalize a handler outcome into the uniform response envelope.
///
/// Tool failures are flattened into an `isError` result with an
/// "Error: " message rather than surfacing as protocol-level errors, so
/// every dispatched call produces exactly one envelope. The `Result` return
/// only exists to match the tool method signature; it is always `Ok`.
pub fn into_envelope(outcome: TodoistResult<CallToolResult>) -> Result<CallToolResult, McpError> {
    Ok(outcome.unwrap_or_else(|err| {
        warn!("Tool call failed: {}", err);
        CallToolResult::error(vec![Content::text(format!("Error: {}", err))])
    }))
}

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

fn found(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("Found 1 {}", noun)
    } else {
        format!("Found {} {}s", count, noun)
    }
}

fn render_task_list(tasks: &[Task], header: String) -> String {
    let blocks: Vec<String> = tasks.iter().map(|task| task.to_string()).collect();
    format!("{}:\n\n{}", header, blocks.join("\n\n"))
}

/// An empty id would mangle the request path, so reject it before any
/// request is made.
fn require_task_id(task_id: &str) -> TodoistResult<()> {
    if task_id.is_empty() {
        return Err(TodoistError::InvalidArgument(
            "task_id must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Task CRUD
// ============================================================================

pub async fn create_task(
    client: &TodoistClient,
    params: CreateTaskParams,
) -> TodoistResult<CallToolResult> {
    let new_task = NewTask {
        content: params.content,
        description: params.description,
        project_id: params.project_id,
        section_id: params.section_id,
        parent_id: params.parent_id,
        order: params.order,
        labels: params.labels,
        priority: params.priority,
        due_string: params.due_string,
        due_date: params.due_date,
        due_datetime: params.due_datetime,
        due_lang: params.due_lang,
        assignee_id: params.assignee_id,
    };

    let task = client.create_task(&new_task).await?;
    Ok(text_result(format!("Created task:\n{}", task)))
}

pub async fn update_task(
    client: &TodoistClient,
    params: UpdateTaskParams,
) -> TodoistResult<CallToolResult> {
    require_task_id(&params.task_id)?;

    let update = TaskUpdate {
        content: params.content,
        description: params.description,
        labels: params.labels,
        priority: params.priority,
        due_string: params.due_string,
        due_date: params.due_date,
        due_datetime: params.due_datetime,
    };

    let task = client.update_task(&params.task_id, &update).await?;
    Ok(text_result(format!("Updated task:\n{}", task)))
}

pub async fn close_task(
    client: &TodoistClient,
    params: CloseTaskParams,
) -> TodoistResult<CallToolResult> {
    require_task_id(&params.task_id)?;
    client.close_task(&params.task_id).await?;
    Ok(text_result(format!("Closed task {}", params.task_id)))
}

pub async fn reopen_task(
    client: &TodoistClient,
    params: ReopenTaskParams,
) -> TodoistResult<CallToolResult> {
    require_task_id(&params.task_id)?;
    client.reopen_task(&params.task_id).await?;
    Ok(text_result(format!("Reopened task {}", params.task_id)))
}

pub async fn delete_task(
    client: &TodoistClient,
    params: DeleteTaskParams,
) -> TodoistResult<CallToolResult> {
    require_task_id(&params.task_id)?;
    client.delete_task(&params.task_id).await?;
    Ok(text_result(format!("Deleted task {}", params.task_id)))
}

// ============================================================================
// Task Queries
// ============================================================================

pub async fn get_tasks(
    client: &TodoistClient,
    params: GetTasksParams,
) -> TodoistResult<CallToolResult> {
    let query = TaskQuery {
        project_id: params.project_id,
        section_id: params.section_id,
        label: params.label,
        ids: params.ids,
    };

    let tasks = client.tasks(&query).await?;
    if tasks.is_empty() {
        return Ok(text_result("No tasks found matching the criteria"));
    }
    let header = found(tasks.len(), "task");
    Ok(text_result(render_task_list(&tasks, header)))
}

pub async fn get_tasks_by_filter(
    client: &TodoistClient,
    params: GetTasksByFilterParams,
) -> TodoistResult<CallToolResult> {
    if params.filter.is_empty() || params.filter.chars().count() > 1024 {
        return Err(TodoistError::InvalidArgument(
            "filter must be between 1 and 1024 characters".to_string(),
        ));
    }

    let tasks = client
        .tasks_by_filter(&params.filter, params.lang.as_deref())
        .await?;
    if tasks.is_empty() {
        return Ok(text_result(format!(
            "No tasks found matching filter: \"{}\"",
            params.filter
        )));
    }
    let header = format!("{} matching \"{}\"", found(tasks.len(), "task"), params.filter);
    Ok(text_result(render_task_list(&tasks, header)))
}

// ============================================================================
// Projects
// ============================================================================

pub async fn get_projects(client: &TodoistClient) -> TodoistResult<CallToolResult> {
    let projects = client.projects().await?;
    if projects.is_empty() {
        return Ok(text_result("No projects found"));
    }

    let lines: Vec<String> = projects.iter().map(|project| format!("- {}", project)).collect();
    Ok(text_result(format!(
        "{}:\n{}",
        found(projects.len(), "project"),
        lines.join("\n")
    )))
}

// ============================================================================
// Quick Add
// ============================================================================

pub async fn quick_add_task(
    client: &TodoistClient,
    params: QuickAddTaskParams,
) -> TodoistResult<CallToolResult> {
    let quick = QuickAdd {
        text: params.text,
        note: params.note,
        reminder: params.reminder,
        auto_reminder: params.auto_reminder,
    };

    let task = client.quick_add(&quick).await?;
    Ok(text_result(format!("Added task:\n{}", task)))
}
