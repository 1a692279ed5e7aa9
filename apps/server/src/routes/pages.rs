//! HTML pages: bug list, the report form and the sign-in forms.

use actix_session::Session;
use actix_web::{http::header, http::StatusCode, web, HttpResponse, Responder, ResponseError};

use crate::auth::{self, AuthenticatedUser};
use crate::error::AppError;
use crate::models::{CreateBug, CreateUserRequest, LoginRequest};
use crate::services::{BugStore, BugSubmission, SubmitError, UsersService};
use crate::views::{self, auth_form, bug_list, create_form, Flash};

const CREATED_MESSAGE: &str = "Bug reported successfully";
const CREATE_FAILED_MESSAGE: &str = "Failed to create bug report";

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn signed_in(session: &Session) -> bool {
    auth::get_user_id_from_session(session).is_some()
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /
pub async fn home() -> impl Responder {
    see_other("/bugs")
}

/// GET /bugs
/// A failed fetch is logged and shown as an empty list
pub async fn bug_list_page(store: web::Data<dyn BugStore>, session: Session) -> HttpResponse {
    let bugs = match store.list_recent_first().await {
        Ok(bugs) => bugs,
        Err(e) => {
            log::error!("Error fetching bugs: {}", e);
            Vec::new()
        }
    };

    let flash = auth::take_flash(&session).map(Flash::Success);
    html(
        StatusCode::OK,
        views::page(
            "Bug Reports",
            flash.as_ref(),
            signed_in(&session),
            &bug_list::render(&bugs),
        ),
    )
}

/// GET /create
pub async fn create_page(session: Session) -> HttpResponse {
    html(
        StatusCode::OK,
        views::page(
            "Report New Bug",
            None,
            signed_in(&session),
            &create_form::render(&CreateBug::default()),
        ),
    )
}

/// POST /create
/// On success redirects to the list with a flash; otherwise re-renders the form
pub async fn submit_create(
    submission: web::Data<BugSubmission>,
    session: Session,
    form: web::Form<CreateBug>,
    user: AuthenticatedUser,
) -> HttpResponse {
    let values = form.into_inner();

    let (status, message) = match submission.submit(&user.0, values.clone()).await {
        Ok(_) => {
            auth::set_flash(&session, CREATED_MESSAGE);
            return see_other("/bugs");
        }
        Err(SubmitError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
        Err(SubmitError::Persistence(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            CREATE_FAILED_MESSAGE.to_string(),
        ),
        Err(SubmitError::Notification { source, .. }) => {
            (StatusCode::BAD_GATEWAY, source.to_string())
        }
    };

    let flash = Flash::Error(message);
    html(
        status,
        views::page(
            "Report New Bug",
            Some(&flash),
            true,
            &create_form::render(&values),
        ),
    )
}

/// Status and user-facing text for a failed sign-in or sign-up
fn account_failure(err: &AppError) -> (StatusCode, String) {
    match err {
        AppError::Validation(msg) | AppError::Conflict(msg) | AppError::Unauthorized(msg) => {
            (err.status_code(), msg.clone())
        }
        other => {
            log::error!("Account form failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong, please try again".to_string(),
            )
        }
    }
}

/// GET /login
/// Signed-in users go straight to the list
pub async fn login_page(session: Session) -> HttpResponse {
    if signed_in(&session) {
        return see_other("/bugs");
    }
    html(
        StatusCode::OK,
        views::page("Sign In", None, false, &auth_form::render_login("")),
    )
}

/// POST /login
pub async fn submit_login(
    pool: web::Data<sqlx::PgPool>,
    session: Session,
    form: web::Form<LoginRequest>,
) -> HttpResponse {
    let result = UsersService::authenticate(pool.get_ref(), &form)
        .await
        .and_then(|user| auth::set_user_session(&session, user.id));

    match result {
        Ok(()) => see_other("/bugs"),
        Err(e) => {
            let (status, message) = account_failure(&e);
            let flash = Flash::Error(message);
            html(
                status,
                views::page(
                    "Sign In",
                    Some(&flash),
                    false,
                    &auth_form::render_login(&form.email),
                ),
            )
        }
    }
}

/// GET /register
pub async fn register_page(session: Session) -> HttpResponse {
    if signed_in(&session) {
        return see_other("/bugs");
    }
    html(
        StatusCode::OK,
        views::page("Register", None, false, &auth_form::render_register("")),
    )
}

/// POST /register
/// Creates the account and signs it in
pub async fn submit_register(
    pool: web::Data<sqlx::PgPool>,
    session: Session,
    form: web::Form<CreateUserRequest>,
) -> HttpResponse {
    let result = UsersService::register(pool.get_ref(), &form)
        .await
        .and_then(|user| auth::set_user_session(&session, user.id));

    match result {
        Ok(()) => see_other("/bugs"),
        Err(e) => {
            let (status, message) = account_failure(&e);
            let flash = Flash::Error(message);
            html(
                status,
                views::page(
                    "Register",
                    Some(&flash),
                    false,
                    &auth_form::render_register(&form.email),
                ),
            )
        }
    }
}

/// POST /logout
pub async fn submit_logout(session: Session) -> HttpResponse {
    auth::clear_session(&session);
    see_other("/bugs")
}

/// Configure page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/bugs", web::get().to(bug_list_page))
        .service(
            web::resource("/create")
                .route(web::get().to(create_page))
                .route(web::post().to(submit_create)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(login_page))
                .route(web::post().to(submit_login)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(register_page))
                .route(web::post().to(submit_register)),
        )
        .route("/logout", web::post().to(submit_logout));
}
