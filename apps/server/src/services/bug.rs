//! Persistence of bug reports.
//!
//! Handlers and the submission flow only see the [`BugStore`] trait; the
//! server wires in [`PgBugStore`], tests swap in in-memory stores.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{BugReport, CreateBug};

const BUG_COLUMNS: &str =
    "id, title, description, priority, status, assigned_to, created_by, created_at";

/// Storage backend for the `bugs` table
#[async_trait]
pub trait BugStore: Send + Sync {
    /// Inserts one bug and returns the stored row, including the
    /// database-assigned `id`, `status` and `created_at`.
    async fn insert(&self, input: &CreateBug, created_by: i32) -> AppResult<BugReport>;

    /// All bugs, newest first
    async fn list_recent_first(&self) -> AppResult<Vec<BugReport>>;
}

/// PostgreSQL-backed [`BugStore`]
#[derive(Clone)]
pub struct PgBugStore {
    pool: PgPool,
}

impl PgBugStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BugStore for PgBugStore {
    async fn insert(&self, input: &CreateBug, created_by: i32) -> AppResult<BugReport> {
        let bug = sqlx::query_as::<_, BugReport>(&format!(
            r#"
            INSERT INTO bugs (title, description, priority, assigned_to, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BUG_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.priority.to_string())
        .bind(&input.assigned_to)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Bug {} created by user {}", bug.id, created_by);
        Ok(bug)
    }

    async fn list_recent_first(&self) -> AppResult<Vec<BugReport>> {
        // id breaks ties between bugs inserted in the same transaction timestamp
        let bugs = sqlx::query_as::<_, BugReport>(&format!(
            r#"
            SELECT {}
            FROM bugs
            ORDER BY created_at DESC, id DESC
            "#,
            BUG_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bugs)
    }
}
