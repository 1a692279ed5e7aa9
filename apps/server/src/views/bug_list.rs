//! The "Bug Reports" page.

use super::html_escape;
use crate::models::BugReport;

fn render_card(bug: &BugReport) -> String {
    let icon = bug.status.icon();
    format!(
        r#"        <div class="bg-white p-6 rounded-lg shadow-md" data-bug-id="{id}">
            <div class="flex justify-between items-start">
                <div class="space-y-1">
                    <h3 class="text-lg font-semibold text-gray-800">{title}</h3>
                    <p class="text-gray-600">{description}</p>
                </div>
                <div class="flex items-center space-x-2">
                    <span class="px-2 py-1 rounded-full text-xs font-medium {badge_class}">{priority}</span>
                    <span class="h-5 w-5 {icon_class}" data-icon="{icon_name}" title="{status}">{glyph}</span>
                </div>
            </div>
            <div class="mt-4 flex items-center justify-between text-sm text-gray-500">
                <span>Assigned to: {assigned_to}</span>
                <span>Created: {created}</span>
            </div>
        </div>"#,
        id = bug.id,
        title = html_escape(&bug.title),
        description = html_escape(&bug.description),
        badge_class = bug.priority.badge_class(),
        priority = bug.priority,
        icon_class = icon.color_class,
        icon_name = icon.name,
        status = bug.status,
        glyph = icon.glyph,
        assigned_to = html_escape(&bug.assigned_to),
        created = bug.created_at.format("%Y-%m-%d"),
    )
}

/// Renders bugs in the order given; callers pass them newest first
pub fn render(bugs: &[BugReport]) -> String {
    let cards: Vec<String> = bugs.iter().map(render_card).collect();
    format!(
        r#"<div class="space-y-6">
    <h2 class="text-2xl font-bold text-gray-800">Bug Reports</h2>
    <div class="grid gap-6">
{}
    </div>
</div>"#,
        cards.join("\n")
    )
}
