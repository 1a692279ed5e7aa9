use super::html_escape;

/// One-shot notice shown at the top right of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    fn render(&self) -> String {
        let (class, message) = match self {
            Flash::Success(m) => ("toast toast-success", m),
            Flash::Error(m) => ("toast toast-error", m),
        };
        format!(
            r#"<div class="{}" role="status">{}</div>"#,
            class,
            html_escape(message)
        )
    }
}

/// Right-hand nav entries: report and logout for a signed-in user,
/// login and register otherwise
fn nav_links(signed_in: bool) -> &'static str {
    if signed_in {
        r#"<a href="/create">Report Bug</a>
                <form method="post" action="/logout" class="inline">
                    <button type="submit">Logout</button>
                </form>"#
    } else {
        r#"<a href="/login">Login</a>
                <a href="/register">Register</a>"#
    }
}

/// Wraps page content in the document shell and navigation bar
pub fn page(title: &str, flash: Option<&Flash>, signed_in: bool, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} · Bug Tracker</title>
</head>
<body class="min-h-screen bg-gray-50">
    <nav class="bg-indigo-600 text-white">
        <div class="max-w-7xl mx-auto px-4 flex h-16 items-center justify-between">
            <a href="/" class="text-xl font-bold">Bug Tracker</a>
            <div class="space-x-4">
                <a href="/bugs">View Bugs</a>
                {nav}
            </div>
        </div>
    </nav>
    <div class="fixed top-4 right-4">{flash}</div>
    <main class="max-w-7xl mx-auto px-4 py-8">
{content}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        nav = nav_links(signed_in),
        flash = flash.map(Flash::render).unwrap_or_default(),
        content = content,
    )
}
