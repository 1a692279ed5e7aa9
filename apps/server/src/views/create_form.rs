//! The "Report New Bug" form.

use super::html_escape;
use crate::models::{CreateBug, Priority};

fn priority_options(selected: Priority) -> String {
    Priority::ALL
        .iter()
        .map(|p| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                p,
                if *p == selected { " selected" } else { "" },
                p.label()
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Renders the form pre-filled with `values` (empty on first visit)
pub fn render(values: &CreateBug) -> String {
    format!(
        r#"<div class="max-w-2xl mx-auto">
    <div class="bg-white p-8 rounded-lg shadow-md">
        <h2 class="text-2xl font-bold text-gray-800 mb-6">Report New Bug</h2>
        <form method="post" action="/create" class="space-y-6">
            <div>
                <label for="title">Title</label>
                <input type="text" id="title" name="title" value="{title}" required>
            </div>
            <div>
                <label for="description">Description</label>
                <textarea id="description" name="description" rows="4" required>{description}</textarea>
            </div>
            <div>
                <label for="priority">Priority</label>
                <select id="priority" name="priority">{options}</select>
            </div>
            <div>
                <label for="assigned_to">Assign To (Email)</label>
                <input type="email" id="assigned_to" name="assigned_to" value="{assigned_to}" required>
            </div>
            <button type="submit">Submit Bug Report</button>
        </form>
    </div>
</div>"#,
        title = html_escape(&values.title),
        description = html_escape(&values.description),
        options = priority_options(values.priority),
        assigned_to = html_escape(&values.assigned_to),
    )
}
