//! Server-rendered HTML pages.
//!
//! Plain `format!` templates; everything user-supplied goes through
//! [`html_escape`].

pub mod auth_form;
pub mod bug_list;
pub mod create_form;
pub mod layout;

pub use layout::{page, Flash};

/// Simple HTML escaping for text and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
