//! Integration tests module
//!
//! Contains tests that require a database and test the full API.

#[path = "../common/mod.rs"]
mod common;
