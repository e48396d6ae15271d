//! Prompt templates for todoist-mcp
//!
//! Each template embeds a live planning view into a single user-role
//! message with a fixed four-point request, so the agent receives the data
//! and the ask in one turn.

/// Name of the daily planning prompt.
pub const DAILY_PLANNER: &str = "daily_planner";
/// Name of the weekly task management prompt.
pub const TASK_MANAGER: &str = "task_manager";

/// User message for the daily planning prompt.
pub fn daily_planner_message(daily_view: &str) -> String {
    format!(
        "Here is my task list for today:\n\n{}\n\nPlease help me plan my day:\n\
         1. Prioritize: which tasks should I tackle first, and why?\n\
         2. Schedule: suggest a realistic order with rough time blocks.\n\
         3. Capacity: flag anything that looks like too much for one day.\n\
         4. Actions: give a concrete next step for each urgent task.",
        daily_view
    )
}

/// User message for the task management prompt.
///
/// A blank context is treated the same as an absent one.
pub fn task_manager_message(weekly_view: &str, context: Option<&str>) -> String {
    let mut message = format!("Here is my task list for the coming week:\n\n{}", weekly_view);
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        message.push_str(&format!("\n\nAdditional context: {}", context));
    }
    message.push_str(
        "\n\nPlease help me manage these tasks:\n\
         1. Organization: how should this work be grouped or restructured?\n\
         2. Workflow: what order of execution minimizes friction?\n\
         3. Tools: which Todoist features (labels, filters, priorities) would help?\n\
         4. Planning: what should be scheduled now and what can wait?",
    );
    message
}
