//! Account routes
//!
//! Sign-up, sign-in, and sign-out. Passwords are stored as Argon2id
//! hashes; a successful call answers with the session the client should
//! hold on to.

use super::bearer_token;
use crate::app::AppState;
use crate::config::MIN_PASSWORD_LENGTH;
use crate::error::{AppError, Result};
use crate::session::Session;
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::Deserialize;
use serde_json::json;

pub fn configure_routes() -> Scope {
    web::scope("/auth")
        .route("/sign_up", web::post().to(sign_up))
        .route("/sign_in", web::post().to(sign_in))
        .route("/sign_out", web::post().to(sign_out))
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Generic(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse> {
    let email = body.email.trim().to_lowercase();

    if !email.contains('@') {
        return Ok(HttpResponse::BadRequest().json(json!({ "error": "Invalid email address" })));
    }
    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH)
        })));
    }

    if state.repo.get_user_by_email(&email).await?.is_some() {
        return Ok(
            HttpResponse::Conflict().json(json!({ "error": "Email is already registered" }))
        );
    }

    let password_hash = hash_password(&body.password)?;
    let user = state.repo.create_user(&email, &password_hash).await?;
    let session = state.repo.create_session(&user.id).await?;

    tracing::info!("Registered user {}", user.id);

    Ok(HttpResponse::Ok().json(Session {
        user_id: session.user_id,
        token: session.token,
    }))
}

async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse> {
    let email = body.email.trim().to_lowercase();

    let Some(user) = state.repo.get_user_by_email(&email).await? else {
        return Ok(
            HttpResponse::Unauthorized().json(json!({ "error": "Invalid email or password" }))
        );
    };

    if !verify_password(&body.password, &user.password_hash) {
        return Ok(
            HttpResponse::Unauthorized().json(json!({ "error": "Invalid email or password" }))
        );
    }

    let session = state.repo.create_session(&user.id).await?;

    tracing::debug!("User {} signed in", user.id);

    Ok(HttpResponse::Ok().json(Session {
        user_id: session.user_id,
        token: session.token,
    }))
}

async fn sign_out(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let Some(token) = bearer_token(&req) else {
        return Ok(
            HttpResponse::Unauthorized().json(json!({ "error": "Missing bearer token" }))
        );
    };

    // Idempotent: revoking an unknown token still answers ok
    state.repo.delete_session(token).await?;

    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
