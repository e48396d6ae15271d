//! Todoist API client
//!
//! Stateless facade over the Todoist REST v2 API. Each method maps to one
//! remote operation; non-success responses surface Todoist's own error text.
//! Quick-add goes through the Sync v9 endpoint, which is the only place the
//! natural-language parser is exposed.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, error};

use super::error::{TodoistError, TodoistResult};
use crate::config::Config;
use crate::types::{Project, Task};

/// New task input for `create_task`
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTask {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

/// Fields to change on an existing task; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
}

/// Field-based criteria for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub project_id: Option<String>,
    pub section_id: Option<String>,
    pub label: Option<String>,
    pub ids: Option<Vec<String>>,
}

/// Quick-add input in Todoist's natural-language syntax
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuickAdd {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reminder: Option<bool>,
}

/// Todoist API client
///
/// Holds only the HTTP connection pool and credentials, so one instance is
/// shared read-only across all concurrent dispatches.
#[derive(Clone)]
pub struct TodoistClient {
    http: Client,
    token: String,
    base_url: String,
}

impl TodoistClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> TodoistResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("todoist-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            token: config.api_token.clone(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Todoist request: {} {}", method, url);
        self.http.request(method, url).bearer_auth(&self.token)
    }

    async fn check(response: Response) -> TodoistResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Todoist API error: {}", status);
            return Err(TodoistError::Api { status, body });
        }
        Ok(response)
    }

    /// Create a new task.
    pub async fn create_task(&self, task: &NewTask) -> TodoistResult<Task> {
        let response = self
            .request(Method::POST, "/rest/v2/tasks")
            .json(task)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// List active tasks matching field-based criteria.
    pub async fn tasks(&self, query: &TaskQuery) -> TodoistResult<Vec<Task>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(project_id) = &query.project_id {
            params.push(("project_id", project_id.clone()));
        }
        if let Some(section_id) = &query.section_id {
            params.push(("section_id", section_id.clone()));
        }
        if let Some(label) = &query.label {
            params.push(("label", label.clone()));
        }
        if let Some(ids) = &query.ids {
            params.push(("ids", ids.join(",")));
        }

        let response = self
            .request(Method::GET, "/rest/v2/tasks")
            .query(&params)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// List active tasks matching a filter expression.
    ///
    /// The expression is forwarded verbatim; Todoist owns the grammar and
    /// rejects malformed filters server-side.
    pub async fn tasks_by_filter(&self, filter: &str, lang: Option<&str>) -> TodoistResult<Vec<Task>> {
        let mut params = vec![("filter", filter.to_string())];
        if let Some(lang) = lang {
            params.push(("lang", lang.to_string()));
        }

        let response = self
            .request(Method::GET, "/rest/v2/tasks")
            .query(&params)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Update fields on an existing task, returning the refreshed task.
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> TodoistResult<Task> {
        let response = self
            .request(Method::POST, &format!("/rest/v2/tasks/{}", id))
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Close (complete) a task.
    pub async fn close_task(&self, id: &str) -> TodoistResult<()> {
        let response = self
            .request(Method::POST, &format!("/rest/v2/tasks/{}/close", id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Reopen a previously closed task.
    pub async fn reopen_task(&self, id: &str) -> TodoistResult<()> {
        let response = self
            .request(Method::POST, &format!("/rest/v2/tasks/{}/reopen", id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete a task permanently.
    pub async fn delete_task(&self, id: &str) -> TodoistResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/rest/v2/tasks/{}", id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// List all projects.
    pub async fn projects(&self) -> TodoistResult<Vec<Project>> {
        let response = self.request(Method::GET, "/rest/v2/projects").send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Add a task through quick-add, letting Todoist parse dates, labels,
    /// and project references out of the text.
    pub async fn quick_add(&self, quick: &QuickAdd) -> TodoistResult<Task> {
        let response = self
            .request(Method::POST, "/sync/v9/quick/add")
            .json(quick)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_body_omits_absent_fields() {
        let task = NewTask {
            content: "Call mom".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&task).unwrap();
        assert_eq!(body, serde_json::json!({"content": "Call mom"}));
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let update = TaskUpdate::default();
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let config = Config {
            api_token: "token".to_string(),
            api_url: "https://api.todoist.com/".to_string(),
            timeout_secs: 5,
        };
        let client = TodoistClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.todoist.com");
    }
}
