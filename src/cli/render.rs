//! Text rendering of projects and tasks

use chrono::{DateTime, Utc};

use crate::domain::{Project, Task, DATE_FORMAT};

const PROJECT_RULE: usize = 60;
const TASK_RULE: usize = 50;

/// Formats a creation timestamp as `Jan 05, 2025 14:03:09 UTC`
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %d, %Y %H:%M:%S UTC").to_string()
}

/// Wraps a description to `width`, indented by two spaces
fn description_block(description: &str, width: usize) -> String {
    let text = if description.is_empty() {
        "(none)"
    } else {
        description
    };
    let options = textwrap::Options::new(width)
        .initial_indent("  ")
        .subsequent_indent("  ");
    textwrap::fill(text, options)
}

fn deadline_text(task: &Task) -> String {
    task.deadline()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "(none)".to_string())
}

/// One line in the project listing
pub fn project_line(position: usize, project: &Project) -> String {
    format!(
        "{}. {} (ID: {}) - {} task(s)",
        position,
        project.name(),
        project.id(),
        project.tasks().len()
    )
}

/// One line in a task listing
pub fn task_line(position: usize, task: &Task) -> String {
    let mut line = format!("{}. [{}] {} (id={})", position, task.state(), task.name(), task.id());
    if let Some(deadline) = task.deadline() {
        line.push_str(&format!(" due {}", deadline.format(DATE_FORMAT)));
    }
    line
}

/// Full project view with its task list
pub fn project_details(project: &Project, width: usize) -> String {
    let summary = project.summary();
    let mut lines = vec![
        "-".repeat(PROJECT_RULE),
        format!("Project: {}  (id: {})", summary.name, summary.id),
        format!("Created: {}", timestamp(summary.created_at)),
        format!("Description:\n{}", description_block(&summary.description, width)),
        format!("Tasks: {}", summary.task_count),
    ];

    if !project.tasks().is_empty() {
        lines.push(String::new());
        lines.push("Task list:".to_string());
        for (i, task) in project.tasks().iter().enumerate() {
            lines.push(format!("  {}", task_line(i + 1, task)));
        }
    }

    lines.push("-".repeat(PROJECT_RULE));
    lines.join("\n")
}

/// Full task view
pub fn task_details(task: &Task, width: usize) -> String {
    let summary = task.summary();
    [
        "-".repeat(TASK_RULE),
        format!("Task: {}  (id: {})", summary.name, summary.id),
        format!("State: {}", summary.state),
        format!("Deadline: {}", deadline_text(task)),
        format!("Created: {}", timestamp(summary.created_at)),
        format!("Description:\n{}", description_block(&summary.description, width)),
        "-".repeat(TASK_RULE),
    ]
    .join("\n")
}
