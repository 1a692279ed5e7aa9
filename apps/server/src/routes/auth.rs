use actix_session::Session;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::auth::{self, AuthenticatedUser};
use crate::error::AppResult;
use crate::models::{CreateUserRequest, LoginRequest, User};
use crate::services::UsersService;

#[derive(Serialize)]
struct AuthResponse {
    user: UserResponse,
}

#[derive(Serialize)]
struct UserResponse {
    id: i32,
    email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// POST /auth/register
/// Create new user account
pub async fn register(
    pool: web::Data<sqlx::PgPool>,
    session: Session,
    req: web::Json<CreateUserRequest>,
) -> AppResult<impl Responder> {
    let user = UsersService::register(pool.get_ref(), &req).await?;

    auth::set_user_session(&session, user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse { user: user.into() }))
}

/// POST /auth/login
/// Authenticate user and create session
pub async fn login(
    pool: web::Data<sqlx::PgPool>,
    session: Session,
    req: web::Json<LoginRequest>,
) -> AppResult<impl Responder> {
    let user = UsersService::authenticate(pool.get_ref(), &req).await?;

    auth::set_user_session(&session, user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse { user: user.into() }))
}

/// POST /auth/logout
/// Sign out
pub async fn logout(session: Session) -> impl Responder {
    auth::clear_session(&session);
    HttpResponse::NoContent().finish()
}

/// GET /auth/me
/// Get current authenticated user
pub async fn get_current_user(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(get_current_user)),
    );
}
