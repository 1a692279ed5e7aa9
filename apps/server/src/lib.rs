//! Bugtrack Server Library
//!
//! This module exposes the server components for testing purposes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod functions;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;
