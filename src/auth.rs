// ABOUTME: Authentication collaborator contract with a Supabase (GoTrue) implementation
// ABOUTME: Email+password sign-in/sign-up; tokens are opaque strings to this crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Authentication Provider
//!
//! User authentication is an external collaborator: this crate only models
//! its contract (email+password sign-in and sign-up) and ships a client for
//! the Supabase GoTrue REST API. No account state is persisted here; the
//! session token lives only as long as the process conversation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, warn};

use crate::constants::env_config;
use crate::errors::{AppError, AppResult};

/// An authenticated session returned by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque access token
    pub access_token: String,
    /// Opaque refresh token, when the provider issues one
    pub refresh_token: Option<String>,
    /// Authenticated user's email
    pub email: String,
    /// Expiry instant derived from the provider's `expires_in`
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Whether the session is past its expiry instant
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Contract for the authentication collaborator
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign an existing user in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::AuthInvalid`] on rejected
    /// credentials and an external-service error on transport failures.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Register a new user. The provider may require email confirmation
    /// before the first sign-in succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider rejects the registration.
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<()>;

    /// Invalidate a session token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures.
    async fn sign_out(&self, session: &AuthSession) -> AppResult<()>;
}

// ============================================================================
// Supabase (GoTrue) implementation
// ============================================================================

#[derive(Debug, Serialize)]
struct CredentialsPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    email: Option<String>,
}

/// Supabase auth client (GoTrue REST API)
pub struct SupabaseAuthProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseAuthProvider {
    /// Create a client for a Supabase project
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from `SUPABASE_URL` and `SUPABASE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> AppResult<Self> {
        let base_url = env::var(env_config::SUPABASE_URL)
            .map_err(|_| AppError::config_missing(env_config::SUPABASE_URL))?;
        let api_key = env::var(env_config::SUPABASE_KEY)
            .map_err(|_| AppError::config_missing(env_config::SUPABASE_KEY))?;
        Ok(Self::new(base_url, api_key))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

impl std::fmt::Debug for SupabaseAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuthProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let url = self.endpoint("token?grant_type=password");
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&CredentialsPayload { email, password })
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "sign-in rejected");
            return Err(AppError::auth_invalid(detail));
        }
        if !status.is_success() {
            return Err(AppError::external_service(
                "supabase",
                format!("sign-in failed with HTTP {status}"),
            ));
        }

        let token: TokenResponse = response.json().await?;
        debug!("sign-in accepted");
        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            email: token
                .user
                .and_then(|u| u.email)
                .unwrap_or_else(|| email.to_owned()),
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<()> {
        let url = self.endpoint("signup");
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&CredentialsPayload { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                "supabase",
                format!("sign-up failed with HTTP {status}: {detail}"),
            ));
        }
        debug!("sign-up accepted, confirmation may be pending");
        Ok(())
    }

    async fn sign_out(&self, session: &AuthSession) -> AppResult<()> {
        let url = self.endpoint("logout");
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "supabase",
                format!("sign-out failed with HTTP {}", response.status()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building_trims_trailing_slash() {
        let provider = SupabaseAuthProvider::new("https://proj.supabase.co/", "anon-key");
        assert_eq!(
            provider.endpoint("signup"),
            "https://proj.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn test_session_expiry() {
        let expired = AuthSession {
            access_token: "t".into(),
            refresh_token: None,
            email: "a@b.c".into(),
            expires_at: Some(Utc::now() - Duration::seconds(5)),
        };
        assert!(expired.is_expired());

        let open_ended = AuthSession {
            expires_at: None,
            ..expired
        };
        assert!(!open_ended.is_expired());
    }

    #[test]
    fn test_token_response_deserialization() {
        let raw = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {"id": "uuid", "email": "user@example.com"}
        }"#;
        let parsed: TokenResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.access_token, "jwt");
        assert_eq!(parsed.user.and_then(|u| u.email).as_deref(), Some("user@example.com"));
    }
}
