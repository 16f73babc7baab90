//! HTTP backend
//!
//! Two surfaces: REST account routes under `/auth` with real HTTP status
//! codes, and the procedure dispatcher under `/rpc` where every
//! dispatched call answers 200 with the `{ data, error }` envelope.

pub mod auth;
pub mod procedures;

use actix_web::HttpRequest;

/// Pull the bearer token out of the Authorization header, if any.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
