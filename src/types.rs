//! Type definitions for Todoist task and project snapshots

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Due-date information attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Due {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    /// Human-readable due text as Todoist displays it, e.g. "tomorrow at 12".
    #[serde(rename = "string")]
    pub display_string: String,
}

/// A task snapshot as returned by the Todoist API.
///
/// Read-only: tasks are created, mutated, and destroyed by Todoist. Unknown
/// wire fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due: Option<Due>,
    /// Priority from 1 (normal) to 4 (urgent), per the REST API scale.
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_priority() -> u8 {
    1
}

/// A project snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_shared: bool,
}

/// Display label for a numeric priority.
///
/// Numeric 4 is the most urgent on the REST API scale. The Todoist UI counts
/// the other way ("p1" is the most urgent); everything here follows the API
/// direction, so 4 maps to the strongest label.
pub fn priority_label(priority: u8) -> String {
    match priority {
        4 => "High".to_string(),
        3 => "Medium".to_string(),
        2 => "Low".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for Task {
    /// Multi-line display block: content and id always, optional fields only
    /// when present. Never emits a line for absent data.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id: {})", self.content, self.id)?;
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            write!(f, "\n  Description: {}", description)?;
        }
        if let Some(due) = &self.due {
            write!(f, "\n  Due: {}", due.display_string)?;
        }
        write!(f, "\n  Priority: {}", priority_label(self.priority))?;
        if !self.labels.is_empty() {
            write!(f, "\n  Labels: {}", self.labels.join(", "))?;
        }
        if let Some(project_id) = &self.project_id {
            write!(f, "\n  Project: {}", project_id)?;
        }
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id: {})", self.name, self.id)?;
        if self.is_shared {
            write!(f, " [shared]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_task() -> Task {
        Task {
            id: "7890".to_string(),
            content: "Buy milk".to_string(),
            description: None,
            due: None,
            priority: 1,
            labels: vec![],
            project_id: None,
        }
    }

    #[test]
    fn display_renders_all_fields_when_present() {
        let task = Task {
            description: Some("2% if they have it".to_string()),
            due: Some(Due {
                date: "2024-05-01".to_string(),
                display_string: "tomorrow at 12".to_string(),
            }),
            priority: 4,
            labels: vec!["errands".to_string(), "home".to_string()],
            project_id: Some("2203306141".to_string()),
            ..bare_task()
        };

        let text = task.to_string();
        assert_eq!(
            text,
            "Buy milk (id: 7890)\n  Description: 2% if they have it\n  Due: tomorrow at 12\n  Priority: High\n  Labels: errands, home\n  Project: 2203306141"
        );
    }

    #[test]
    fn display_omits_absent_fields() {
        let text = bare_task().to_string();
        assert_eq!(text, "Buy milk (id: 7890)\n  Priority: 1");
        assert!(!text.contains("Description"));
        assert!(!text.contains("Due"));
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn display_treats_empty_description_as_absent() {
        let task = Task {
            description: Some(String::new()),
            ..bare_task()
        };
        assert!(!task.to_string().contains("Description"));
    }

    #[test]
    fn priority_labels_follow_api_direction() {
        // The REST API counts 4 as the most urgent; the Todoist UI inverts
        // the scale and calls that same priority "p1". The label map follows
        // the API direction, which is what the wire values use.
        assert_eq!(priority_label(4), "High");
        assert_eq!(priority_label(3), "Medium");
        assert_eq!(priority_label(2), "Low");
        assert_eq!(priority_label(1), "1");
    }

    #[test]
    fn task_deserializes_from_rest_payload() {
        let json = r#"{
            "id": "2995104339",
            "content": "Buy Milk",
            "description": "",
            "comment_count": 0,
            "is_completed": false,
            "order": 1,
            "priority": 3,
            "project_id": "2203306141",
            "labels": ["Food"],
            "due": {
                "date": "2024-05-01",
                "is_recurring": false,
                "string": "every day",
                "lang": "en"
            },
            "url": "https://todoist.com/showTask?id=2995104339"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "2995104339");
        assert_eq!(task.priority, 3);
        assert_eq!(task.due.as_ref().unwrap().date, "2024-05-01");
        assert_eq!(task.due.as_ref().unwrap().display_string, "every day");
    }

    #[test]
    fn shared_project_is_marked() {
        let project = Project {
            id: "220474322".to_string(),
            name: "Inbox".to_string(),
            is_shared: true,
        };
        assert_eq!(project.to_string(), "Inbox (id: 220474322) [shared]");
    }
}
