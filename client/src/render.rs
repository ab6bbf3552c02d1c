//! Plain-text views for the terminal.

use std::fmt::Write;

use shared::models::{Email, Task};
use shared::state::{AppState, TaskPane};

const PREVIEW_CHARS: usize = 120;

/// Filter line, sync status, then the email list (or its error / loading
/// placeholder).
pub fn inbox(state: &AppState) -> String {
    let mut out = String::new();
    let filter = &state.filter;

    let _ = writeln!(
        out,
        "Search: {:?}  From: {}  To: {}  Sync: {}",
        filter.search_term,
        filter.start_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
        filter.end_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
        state.sync_status.as_str(),
    );

    if let Some(error) = &state.emails.error {
        let _ = writeln!(out, "! {}", error);
    } else if state.emails.loading {
        let _ = writeln!(out, "Loading...");
    } else if state.emails.emails.is_empty() {
        let _ = writeln!(out, "No emails.");
    } else {
        for email in &state.emails.emails {
            let _ = writeln!(
                out,
                "[{}] {}  {}  {}",
                email.id,
                email.date.format("%Y-%m-%d"),
                email.sender,
                email.subject
            );
            let _ = writeln!(out, "      {}", preview(&email.body));
        }
    }

    out
}

pub fn email_detail(email: &Email) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "< Back to Inbox");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", email.subject);
    let _ = writeln!(out, "From: {}", email.sender);
    let _ = writeln!(out, "To: {}", email.recipient);
    let _ = writeln!(out, "Date: {}", email.date.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", email.body);
    out
}

pub fn task_panel(pane: &TaskPane) -> String {
    let mut out = String::from("This Week's Tasks\n");

    if pane.loading {
        out.push_str("Loading tasks...\n");
    } else if pane.tasks.is_empty() {
        out.push_str("No tasks found for this week\n");
    } else {
        for task in &pane.tasks {
            out.push_str(&task_line(task));
        }
    }

    out
}

fn task_line(task: &Task) -> String {
    let mut line = format!("- {}", task.description);
    if !task.assignee.is_empty() {
        let _ = write!(line, " ({})", task.assignee);
    }
    if let Some(deadline) = task.deadline {
        let _ = write!(line, " due {}", deadline.format("%Y-%m-%d"));
    }
    if let Some(priority) = task.priority_label() {
        let _ = write!(line, " [{}]", priority);
    }
    line.push('\n');
    line
}

/// One-line status used by `watch`.
pub fn summary(state: &AppState) -> String {
    let mut line = format!(
        "sync: {} | emails: {} | tasks: {}",
        state.sync_status.as_str(),
        state.emails.emails.len(),
        state.tasks.tasks.len()
    );
    if let Some(error) = &state.emails.error {
        let _ = write!(line, " | error: {}", error);
    }
    line
}

/// First line of the body, capped at a fixed number of characters.
fn preview(body: &str) -> String {
    let first_line = body.lines().next().unwrap_or_default();
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}
