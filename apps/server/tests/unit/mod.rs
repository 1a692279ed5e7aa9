//! Unit tests module
//!
//! Contains tests for individual components in isolation. Nothing here needs
//! a database; collaborators are in-memory fakes or wiremock servers.

#[path = "../common/mod.rs"]
mod common;

mod config_test;
mod function_test;
mod notifier_test;
mod submission_test;
