//! The "New Bug Report" email.

use serde::Deserialize;

use crate::models::Priority;
use crate::views::html_escape;

/// Bug fields the email needs. Extra fields in the payload are ignored, and
/// priority/status stay plain strings so an unknown value still renders.
#[derive(Debug, Clone, Deserialize)]
pub struct BugEmailData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
    pub assigned_to: String,
}

/// `New Bug Report: <title>`
pub fn subject(title: &str) -> String {
    format!("New Bug Report: {}", title)
}

/// Renders the HTML body
pub fn render_html(bug: &BugEmailData) -> String {
    format!(
        r#"
      <div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
        <h1 style="color: #4F46E5;">New Bug Report</h1>
        <div style="background-color: #F3F4F6; padding: 20px; border-radius: 8px;">
          <h2 style="color: #111827; margin-top: 0;">{title}</h2>
          <p style="color: #374151;">{description}</p>
          <div style="margin: 20px 0;">
            <span style="
              background-color: {priority_color};
              color: white;
              padding: 4px 12px;
              border-radius: 9999px;
              font-size: 14px;
            ">{priority}</span>
            <span style="margin-left: 10px; color: #6B7280;">Status: {status}</span>
          </div>
        </div>
        <div style="margin-top: 20px; color: #6B7280;">
          <p>You can view and update this bug in the bug tracking system.</p>
        </div>
      </div>
    "#,
        title = html_escape(&bug.title),
        description = html_escape(&bug.description),
        priority_color = Priority::email_color_for(&bug.priority),
        priority = html_escape(&bug.priority),
        status = html_escape(&bug.status),
    )
}
