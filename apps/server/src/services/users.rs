use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{is_valid_email, CreateUserRequest, LoginRequest, User, MAX_EMAIL_LEN};

pub struct UsersService;

impl UsersService {
    /// Validates a sign-up request and creates the account
    pub async fn register(pool: &PgPool, req: &CreateUserRequest) -> AppResult<User> {
        let email = req.email.trim();
        if email.len() > MAX_EMAIL_LEN || !is_valid_email(email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }

        if req.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        let user = Self::create_user(pool, req).await?;
        log::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Checks credentials and records the login.
    /// Unknown email and wrong password give the same error.
    pub async fn authenticate(pool: &PgPool, req: &LoginRequest) -> AppResult<User> {
        let user = Self::get_by_email(pool, &req.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        if !user.verify_password(&req.password)? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::update_last_login(pool, user.id).await?;
        Ok(user)
    }

    /// Creates a new user. Emails are stored lowercased so login is case-insensitive.
    pub async fn create_user(pool: &PgPool, req: &CreateUserRequest) -> AppResult<User> {
        let password_hash = User::hash_password(&req.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, is_active, created_at, last_login
            "#,
        )
        .bind(req.email.trim().to_lowercase())
        .bind(&password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Email already exists".to_string())
            }
            _ => AppError::Internal(format!("Failed to create user: {}", e)),
        })?;

        Ok(user)
    }

    /// Gets a user by email
    pub async fn get_by_email(pool: &PgPool, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active, created_at, last_login
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID
    pub async fn get_by_id(pool: &PgPool, user_id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active, created_at, last_login
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    pub async fn update_last_login(pool: &PgPool, user_id: i32) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(())
    }
}
