//! Database test utilities
//!
//! Provides helpers for setting up test databases with testcontainers.

use bugtrack::models::{CreateUserRequest, User};
use bugtrack::services::UsersService;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

/// A test database container with connection pool
pub struct TestDb {
    /// The running PostgreSQL container
    #[allow(dead_code)]
    container: ContainerAsync<Postgres>,
    /// Connection pool to the test database
    pub pool: PgPool,
}

impl TestDb {
    /// Creates a new test database with a fresh PostgreSQL container
    pub async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        bugtrack::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        TestDb { container, pool }
    }

    /// Inserts a user directly through the service layer
    pub async fn create_user(&self, email: &str, password: &str) -> User {
        let req = CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        UsersService::create_user(&self.pool, &req)
            .await
            .expect("Failed to create test user")
    }

    /// Number of rows in `bugs`
    pub async fn bug_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bugs")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count bugs");
        count
    }
}
