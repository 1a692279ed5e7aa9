//! Email address syntax check shared by registration and bug submission.

/// Longest address the `users.email` and `bugs.assigned_to` columns hold
pub const MAX_EMAIL_LEN: usize = 255;

/// Checks basic format requirements: one `@`, non-empty local part,
/// dotted domain with non-empty labels and a TLD of at least two chars.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    // Catches "user@.com", "user@domain." and "user@a..b"
    let labels: Vec<&str> = domain.split('.').collect();
    if labels
        .iter()
        .any(|l| l.is_empty() || l.chars().any(char::is_whitespace))
    {
        return false;
    }

    labels.last().is_some_and(|tld| tld.len() >= 2)
}
