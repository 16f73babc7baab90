//! Sessions and the auth client
//!
//! Account endpoints sit outside the RPC surface: they use plain REST
//! routes and real HTTP status codes, since there is no session token to
//! attach yet.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// An authenticated session: who, plus the bearer token proving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        self.authenticate("sign_up", email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.authenticate("sign_in", email, password).await
    }

    async fn authenticate(&self, route: &str, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/auth/{}", self.base_url, route);
        let response = self
            .client
            .post(&url)
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => "Authentication failed".to_string(),
            };
            return Err(AppError::Unauthorized(message));
        }

        Ok(response.json::<Session>().await?)
    }

    /// Revoke the session server-side. The token is dead afterwards even
    /// if the local copy lingers.
    pub async fn sign_out(&self, session: &Session) -> Result<()> {
        let url = format!("{}/auth/sign_out", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&session.token)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Sign-out returned status {}", response.status());
        }

        Ok(())
    }
}
