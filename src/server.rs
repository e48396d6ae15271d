//! MCP server implementation for Todoist
//!
//! This module defines the main MCP server: nine task/project tools, two
//! planning-view resources, and two prompt templates. Handler logic lives in
//! the handlers module; views and prompt text live in views and prompts.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Config;
use crate::handlers;
use crate::params::*;
use crate::prompts;
use crate::todoist::{TodoistClient, TodoistError};
use crate::views;

const MARKDOWN_MIME: &str = "text/markdown";

/// The main Todoist MCP server
#[derive(Clone)]
pub struct TodoistMcpServer {
    client: TodoistClient,
    tool_router: ToolRouter<Self>,
}

fn view_error(err: TodoistError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

fn parse_params<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, McpError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|err| McpError::invalid_params(err.to_string(), None))
}

/// Resource contents with the markdown MIME type instead of the text/plain
/// default the constructor applies.
fn markdown_contents(text: String, uri: &str) -> ResourceContents {
    let mut contents = ResourceContents::text(text, uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(MARKDOWN_MIME.to_string());
    }
    contents
}

fn planning_resources() -> Vec<Resource> {
    let mut daily = RawResource::new(views::DAILY_URI, "Daily Planning View");
    daily.description = Some("Today's tasks with overdue items and priority buckets".to_string());
    daily.mime_type = Some(MARKDOWN_MIME.to_string());

    let mut weekly = RawResource::new(views::WEEKLY_URI, "Weekly Planning View");
    weekly.description = Some("The next 7 days of tasks grouped by due date".to_string());
    weekly.mime_type = Some(MARKDOWN_MIME.to_string());

    vec![daily.no_annotation(), weekly.no_annotation()]
}

fn planning_prompts() -> Vec<Prompt> {
    vec![
        Prompt::new(
            prompts::DAILY_PLANNER,
            Some("Plan today around current Todoist tasks"),
            None,
        ),
        Prompt::new(
            prompts::TASK_MANAGER,
            Some("Organize the coming week of Todoist tasks"),
            Some(vec![PromptArgument {
                name: "context".to_string(),
                title: None,
                description: Some("Extra situation or constraints to plan around".to_string()),
                required: Some(false),
            }]),
        ),
    ]
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl TodoistMcpServer {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let client = TodoistClient::new(config)?;

        Ok(Self {
            client,
            tool_router: Self::tool_router(),
        })
    }

    // ========================================================================
    // Task CRUD
    // ========================================================================

    #[tool(description = "Create a new task with optional project, section, due date, priority, and labels")]
    async fn create_task(
        &self,
        Parameters(params): Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::create_task(&self.client, params).await)
    }

    #[tool(description = "Update fields on an existing task; absent fields are left unchanged")]
    async fn update_task(
        &self,
        Parameters(params): Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::update_task(&self.client, params).await)
    }

    #[tool(description = "Complete a task")]
    async fn close_task(
        &self,
        Parameters(params): Parameters<CloseTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::close_task(&self.client, params).await)
    }

    #[tool(description = "Reopen a previously completed task")]
    async fn reopen_task(
        &self,
        Parameters(params): Parameters<ReopenTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::reopen_task(&self.client, params).await)
    }

    #[tool(description = "Permanently delete a task")]
    async fn delete_task(
        &self,
        Parameters(params): Parameters<DeleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::delete_task(&self.client, params).await)
    }

    // ========================================================================
    // Task Queries
    // ========================================================================

    #[tool(description = "List active tasks, optionally filtered by project, section, label, or specific ids")]
    async fn get_tasks(
        &self,
        Parameters(params): Parameters<GetTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::get_tasks(&self.client, params).await)
    }

    #[tool(description = "Query active tasks with a Todoist filter expression, e.g. \"today | overdue\"")]
    async fn get_tasks_by_filter(
        &self,
        Parameters(params): Parameters<GetTasksByFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::get_tasks_by_filter(&self.client, params).await)
    }

    // ========================================================================
    // Projects and Quick Add
    // ========================================================================

    #[tool(description = "List all projects")]
    async fn get_projects(&self) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::get_projects(&self.client).await)
    }

    #[tool(description = "Add a task using Todoist quick-add syntax, e.g. \"Call mom tomorrow 5pm #Family\"")]
    async fn quick_add_task(
        &self,
        Parameters(params): Parameters<QuickAddTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::into_envelope(handlers::quick_add_task(&self.client, params).await)
    }
}

// ============================================================================
// Dispatch
// ============================================================================

impl TodoistMcpServer {
    /// Route a tool call by name.
    ///
    /// An unregistered name is not a protocol error: it produces an
    /// `isError` envelope naming the unknown tool, and the server keeps
    /// serving. Public so the server can be embedded without a transport;
    /// the MCP `call_tool` handler delegates here.
    pub async fn dispatch_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        info!("Tool call: {}", name);
        match name {
            "create_task" => self.create_task(Parameters(parse_params(arguments)?)).await,
            "update_task" => self.update_task(Parameters(parse_params(arguments)?)).await,
            "close_task" => self.close_task(Parameters(parse_params(arguments)?)).await,
            "reopen_task" => self.reopen_task(Parameters(parse_params(arguments)?)).await,
            "delete_task" => self.delete_task(Parameters(parse_params(arguments)?)).await,
            "get_tasks" => self.get_tasks(Parameters(parse_params(arguments)?)).await,
            "get_tasks_by_filter" => {
                self.get_tasks_by_filter(Parameters(parse_params(arguments)?)).await
            }
            "get_projects" => self.get_projects().await,
            "quick_add_task" => self.quick_add_task(Parameters(parse_params(arguments)?)).await,
            _ => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: Unknown tool: {}",
                name
            ))])),
        }
    }

    /// Build a prompt by name, embedding the live view it needs.
    async fn build_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("Prompt request: {}", name);
        match name {
            prompts::DAILY_PLANNER => {
                let view = views::daily_view(&self.client).await.map_err(view_error)?;
                Ok(GetPromptResult {
                    description: Some("Daily planning session over live Todoist data".to_string()),
                    messages: vec![PromptMessage {
                        role: PromptMessageRole::User,
                        content: PromptMessageContent::text(prompts::daily_planner_message(&view)),
                    }],
                })
            }
            prompts::TASK_MANAGER => {
                let context = arguments
                    .as_ref()
                    .and_then(|args| args.get("context"))
                    .and_then(|value| value.as_str());
                let view = views::weekly_view(&self.client).await.map_err(view_error)?;
                Ok(GetPromptResult {
                    description: Some("Weekly task organization over live Todoist data".to_string()),
                    messages: vec![PromptMessage {
                        role: PromptMessageRole::User,
                        content: PromptMessageContent::text(prompts::task_manager_message(
                            &view, context,
                        )),
                    }],
                })
            }
            _ => Err(McpError::invalid_params(
                format!("Unknown prompt: {}", name),
                None,
            )),
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

impl ServerHandler for TodoistMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Todoist MCP server. Tools cover task CRUD, filter queries, projects, and \
                 quick add. Resources planning/daily and planning/weekly render markdown \
                 planning views; prompts daily_planner and task_manager embed those views \
                 for planning conversations."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch_tool(request.name.as_ref(), request.arguments).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: planning_resources(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!("Resource read: {}", uri);
        let document = match uri.as_str() {
            views::DAILY_URI => views::daily_view(&self.client).await,
            views::WEEKLY_URI => views::weekly_view(&self.client).await,
            _ => {
                return Err(McpError::resource_not_found(
                    format!("Unknown resource: {}", uri),
                    Some(json!({ "uri": uri })),
                ))
            }
        }
        .map_err(view_error)?;

        Ok(ReadResourceResult {
            contents: vec![markdown_contents(document, &uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: planning_prompts(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        GetPromptRequestParam { name, arguments }: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.build_prompt(&name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> TodoistMcpServer {
        let config = Config {
            api_token: "test-token".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        };
        TodoistMcpServer::new(&config).unwrap()
    }

    #[tokio::test]
    async fn unknown_tool_yields_error_envelope() {
        let server = test_server();
        let result = server
            .dispatch_tool("definitely_not_a_tool", None)
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value["content"][0]["text"],
            "Error: Unknown tool: definitely_not_a_tool"
        );
    }

    #[tokio::test]
    async fn unknown_prompt_is_rejected() {
        let server = test_server();
        let err = server.build_prompt("nope", None).await.unwrap_err();
        assert!(err.message.contains("Unknown prompt"));
    }

    #[test]
    fn router_lists_every_tool() {
        let router = TodoistMcpServer::tool_router();
        let names: Vec<String> = router
            .list_all()
            .iter()
            .map(|tool| tool.name.to_string())
            .collect();

        for expected in [
            "create_task",
            "update_task",
            "close_task",
            "reopen_task",
            "delete_task",
            "get_tasks",
            "get_tasks_by_filter",
            "get_projects",
            "quick_add_task",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing tool: {}", expected);
        }
    }

    #[test]
    fn planning_resources_are_markdown() {
        let resources = planning_resources();
        assert_eq!(resources.len(), 2);
        for resource in &resources {
            assert_eq!(resource.mime_type.as_deref(), Some(MARKDOWN_MIME));
        }
    }
}
