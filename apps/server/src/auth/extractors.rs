use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::functions::{FunctionError, FunctionSettings};

/// Bearer token check for function invocations
///
/// Passes when no token is configured. Otherwise the request must carry
/// `Authorization: Bearer <token>` with the configured value.
///
/// ```ignore
/// async fn my_function(_auth: FunctionAuth) -> HttpResponse { ... }
/// ```
pub struct FunctionAuth;

impl FromRequest for FunctionAuth {
    type Error = FunctionError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let expected = match req.app_data::<web::Data<FunctionSettings>>() {
            Some(settings) => settings.token.clone(),
            None => {
                return ready(Err(FunctionError::Failed(
                    "Function settings not configured".to_string(),
                )));
            }
        };

        let Some(expected) = expected else {
            return ready(Ok(FunctionAuth));
        };

        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok());

        let result = match header.and_then(|h| h.strip_prefix("Bearer ")) {
            None => Err(FunctionError::Unauthorized(
                "Missing authorization header".to_string(),
            )),
            Some(token) if token.trim() == expected => Ok(FunctionAuth),
            Some(_) => Err(FunctionError::Unauthorized("Invalid token".to_string())),
        };

        ready(result)
    }
}
