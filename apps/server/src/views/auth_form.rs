//! Sign-in and sign-up forms.
//!
//! Only the email is echoed back after a failed attempt, never the password.

use super::html_escape;

fn render(heading: &str, action: &str, submit: &str, email: &str, footer: &str) -> String {
    format!(
        r#"<div class="max-w-md mx-auto">
    <div class="bg-white p-8 rounded-lg shadow-md">
        <h2 class="text-2xl font-bold text-gray-800 mb-6">{heading}</h2>
        <form method="post" action="{action}" class="space-y-6">
            <div>
                <label for="email">Email</label>
                <input type="email" id="email" name="email" value="{email}" required>
            </div>
            <div>
                <label for="password">Password</label>
                <input type="password" id="password" name="password" required>
            </div>
            <button type="submit">{submit}</button>
        </form>
        <p class="mt-4 text-sm text-gray-600">{footer}</p>
    </div>
</div>"#,
        heading = heading,
        action = action,
        submit = submit,
        email = html_escape(email),
        footer = footer,
    )
}

pub fn render_login(email: &str) -> String {
    render(
        "Sign In",
        "/login",
        "Sign In",
        email,
        r#"No account yet? <a href="/register">Register</a>"#,
    )
}

pub fn render_register(email: &str) -> String {
    render(
        "Create Account",
        "/register",
        "Register",
        email,
        r#"Already registered? <a href="/login">Sign in</a>"#,
    )
}
