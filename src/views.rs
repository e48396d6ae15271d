//! Planning view aggregation
//!
//! Builds the daily and weekly planning documents out of filtered task
//! queries. The remote filter grammar cannot express either document in one
//! query, so the grouping and ordering policy lives here: buckets and date
//! sections are ordered by the view, task lines inside them keep the order
//! the remote query returned (typically due-time order).

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::todoist::{TodoistClient, TodoistResult};
use crate::types::Task;

/// Resource URI of the daily planning document.
pub const DAILY_URI: &str = "planning/daily";
/// Resource URI of the weekly planning document.
pub const WEEKLY_URI: &str = "planning/weekly";

/// Build the daily planning document.
///
/// Runs the "overdue" and "today" queries concurrently and fails the whole
/// view if either fails; a partial document is never returned.
pub async fn daily_view(client: &TodoistClient) -> TodoistResult<String> {
    let (overdue, today) = tokio::try_join!(
        client.tasks_by_filter("overdue", None),
        client.tasks_by_filter("today", None)
    )?;
    Ok(render_daily(&overdue, &today, Local::now().date_naive()))
}

/// Build the weekly planning document from a single "7 days" query.
pub async fn weekly_view(client: &TodoistClient) -> TodoistResult<String> {
    let tasks = client.tasks_by_filter("7 days", None).await?;
    Ok(render_weekly(&tasks, Local::now().date_naive()))
}

/// Render the daily document: overdue section (only when non-empty), today
/// partitioned into urgent/high/normal priority buckets, numeric summary.
pub fn render_daily(overdue: &[Task], today_tasks: &[Task], today: NaiveDate) -> String {
    let mut doc = format!("# Daily Plan: {}\n", today.format("%A, %Y-%m-%d"));

    if !overdue.is_empty() {
        doc.push_str("\n## Overdue\n");
        for task in overdue {
            doc.push_str(&format!("- {}\n", task.content));
        }
    }

    if today_tasks.is_empty() {
        doc.push_str("\nNo tasks scheduled for today.\n");
    } else {
        let (urgent, high, normal) = partition_by_priority(today_tasks);
        let buckets = [("Urgent", urgent), ("High Priority", high), ("Normal", normal)];
        for (heading, bucket) in buckets {
            if bucket.is_empty() {
                continue;
            }
            doc.push_str(&format!("\n## {}\n", heading));
            for task in bucket {
                doc.push_str(&format!("- {}\n", task.content));
            }
        }
    }

    doc.push_str(&format!(
        "\nSummary: {} overdue, {} today\n",
        overdue.len(),
        today_tasks.len()
    ));
    doc
}

/// Render the weekly document: one section per due date in ascending order,
/// tasks without a due date excluded, total count at the end.
pub fn render_weekly(tasks: &[Task], today: NaiveDate) -> String {
    let mut doc = String::from("# Weekly Plan\n");

    if tasks.is_empty() {
        doc.push_str("\nNothing scheduled over the next 7 days.\n");
        return doc;
    }

    let groups = group_by_due_date(tasks);
    let today_key = today.format("%Y-%m-%d").to_string();
    let mut total = 0;

    for (date, group) in &groups {
        let heading = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => format!("{}, {}", parsed.format("%A"), date),
            Err(_) => (*date).to_string(),
        };
        let annotation = if *date == today_key { " (Today)" } else { "" };
        doc.push_str(&format!("\n## {}{}\n", heading, annotation));
        for task in group {
            doc.push_str(&format!("- {}\n", task.content));
        }
        total += group.len();
    }

    let noun = if total == 1 { "task" } else { "tasks" };
    doc.push_str(&format!(
        "\nTotal: {} {} scheduled over the next 7 days\n",
        total, noun
    ));
    doc
}

/// Split tasks into (urgent, high, normal) buckets.
///
/// Numeric priority 4 is urgent on the API scale (the UI calls that same
/// priority "p1"); 3 is high, everything at or below 2 is normal. Every task
/// lands in exactly one bucket.
fn partition_by_priority(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>, Vec<&Task>) {
    let mut urgent = Vec::new();
    let mut high = Vec::new();
    let mut normal = Vec::new();
    for task in tasks {
        match task.priority {
            4 => urgent.push(task),
            3 => high.push(task),
            _ => normal.push(task),
        }
    }
    (urgent, high, normal)
}

/// Group tasks by the calendar-date component of their due date.
///
/// `BTreeMap` keeps keys in lexicographic order, which for ISO dates is
/// chronological order. Tasks without a due date are dropped.
fn group_by_due_date(tasks: &[Task]) -> BTreeMap<&str, Vec<&Task>> {
    let mut groups: BTreeMap<&str, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(due) = &task.due {
            groups.entry(due.date.as_str()).or_default().push(task);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Due;

    fn task(content: &str, priority: u8) -> Task {
        Task {
            id: format!("id-{}", content),
            content: content.to_string(),
            description: None,
            due: None,
            priority,
            labels: vec![],
            project_id: None,
        }
    }

    fn due_task(content: &str, date: &str) -> Task {
        Task {
            due: Some(Due {
                date: date.to_string(),
                display_string: date.to_string(),
            }),
            ..task(content, 1)
        }
    }

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn daily_with_single_urgent_task() {
        let doc = render_daily(&[], &[task("A", 4)], may_first());

        assert!(!doc.contains("## Overdue"));
        assert!(doc.contains("## Urgent\n- A\n"));
        assert!(doc.contains("Summary: 0 overdue, 1 today"));
    }

    #[test]
    fn daily_partition_is_a_disjoint_cover() {
        // Direction check: numeric 4 must land in urgent, not normal. The
        // Todoist UI labels that priority "p1", which is where the two
        // directions historically got crossed.
        let today = vec![
            task("u1", 4),
            task("h1", 3),
            task("n1", 2),
            task("n2", 1),
            task("u2", 4),
        ];
        let (urgent, high, normal) = partition_by_priority(&today);

        assert_eq!(urgent.len(), 2);
        assert_eq!(high.len(), 1);
        assert_eq!(normal.len(), 2);
        assert_eq!(urgent.len() + high.len() + normal.len(), today.len());
        assert!(urgent.iter().all(|t| t.priority == 4));
        assert!(high.iter().all(|t| t.priority == 3));
        assert!(normal.iter().all(|t| t.priority <= 2));
    }

    #[test]
    fn daily_skips_empty_buckets() {
        let doc = render_daily(&[], &[task("only normal", 1)], may_first());

        assert!(!doc.contains("## Urgent"));
        assert!(!doc.contains("## High Priority"));
        assert!(doc.contains("## Normal\n- only normal\n"));
    }

    #[test]
    fn daily_renders_explicit_line_when_today_is_empty() {
        let doc = render_daily(&[task("late", 1)], &[], may_first());

        assert!(doc.contains("## Overdue\n- late\n"));
        assert!(doc.contains("No tasks scheduled for today."));
        assert!(doc.contains("Summary: 1 overdue, 0 today"));
    }

    #[test]
    fn daily_preserves_remote_order_within_sections() {
        let overdue = vec![task("second lexically", 1), task("first lexically", 1)];
        let doc = render_daily(&overdue, &[], may_first());

        let first = doc.find("- second lexically").unwrap();
        let second = doc.find("- first lexically").unwrap();
        assert!(first < second);
    }

    #[test]
    fn daily_heading_names_weekday_and_date() {
        let doc = render_daily(&[], &[], may_first());
        assert!(doc.starts_with("# Daily Plan: Wednesday, 2024-05-01\n"));
    }

    #[test]
    fn weekly_sections_sort_by_date_regardless_of_input_order() {
        let tasks = vec![due_task("later", "2024-05-02"), due_task("sooner", "2024-05-01")];
        let doc = render_weekly(&tasks, NaiveDate::from_ymd_opt(2024, 4, 28).unwrap());

        let first = doc.find("2024-05-01").unwrap();
        let second = doc.find("2024-05-02").unwrap();
        assert!(first < second);
    }

    #[test]
    fn weekly_grouping_is_stable_across_input_orders() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 28).unwrap();
        let forward = vec![
            due_task("a", "2024-05-01"),
            due_task("b", "2024-05-02"),
            due_task("c", "2024-05-03"),
        ];
        let reversed: Vec<Task> = forward.iter().rev().cloned().collect();

        assert_eq!(render_weekly(&forward, today), render_weekly(&reversed, today));
    }

    #[test]
    fn weekly_excludes_tasks_without_due_date() {
        let tasks = vec![due_task("dated", "2024-05-01"), task("undated", 1)];
        let doc = render_weekly(&tasks, may_first());

        assert!(!doc.contains("undated"));
        assert!(doc.contains("Total: 1 task scheduled"));
    }

    #[test]
    fn weekly_marks_today_section() {
        let tasks = vec![due_task("now", "2024-05-01"), due_task("later", "2024-05-02")];
        let doc = render_weekly(&tasks, may_first());

        assert!(doc.contains("## Wednesday, 2024-05-01 (Today)\n"));
        assert!(doc.contains("## Thursday, 2024-05-02\n"));
        assert!(!doc.contains("2024-05-02 (Today)"));
    }

    #[test]
    fn weekly_short_circuits_when_empty() {
        let doc = render_weekly(&[], may_first());
        assert!(doc.contains("Nothing scheduled over the next 7 days."));
        assert!(!doc.contains("##"));
        assert!(!doc.contains("Total:"));
    }
}
