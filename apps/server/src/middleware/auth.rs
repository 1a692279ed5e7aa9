use actix_session::Session;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, FromRequest, HttpResponse,
};
use std::future::{ready, Ready};
use std::pin::Pin;
use std::rc::Rc;

use crate::auth;

/// Pages that only make sense for a signed-in user.
/// JSON APIs and functions authenticate through their extractors instead.
const PROTECTED_PAGES: &[&str] = &["/create"];

fn requires_session(path: &str) -> bool {
    PROTECTED_PAGES
        .iter()
        .any(|p| path == *p || path.starts_with(&format!("{}/", p)))
}

/// Where anonymous visitors of a protected page are sent
pub const LOGIN_PAGE: &str = "/login";

fn redirect_to_login() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PAGE))
        .finish()
}

/// Middleware that sends anonymous visitors of protected pages to the login page
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !requires_session(req.path()) {
            let service = Rc::clone(&self.service);
            return Box::pin(
                async move { service.call(req).await.map(|res| res.map_into_left_body()) },
            );
        }

        // Check session for authenticated user
        let http_req = req.request();
        let session = Session::extract(http_req).into_inner();

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match session {
                Ok(session) => {
                    if auth::get_user_id_from_session(&session).is_some() {
                        service.call(req).await.map(|res| res.map_into_left_body())
                    } else {
                        log::debug!("Redirecting unauthenticated request to {}", req.path());
                        let (http_req, _) = req.into_parts();
                        Ok(ServiceResponse::new(http_req, redirect_to_login())
                            .map_into_right_body())
                    }
                }
                Err(e) => {
                    log::warn!("Session error on {}: {}", req.path(), e);
                    let (http_req, _) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, redirect_to_login())
                        .map_into_right_body())
                }
            }
        })
    }
}
