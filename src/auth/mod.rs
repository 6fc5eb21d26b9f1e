//! Admin bearer-token authentication.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Checks a presented bearer credential.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, presented: &str) -> bool;
}

/// A single shared admin secret.
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialVerifier for SharedSecret {
    fn verify(&self, presented: &str) -> bool {
        constant_time_compare(presented, &self.secret)
    }
}

/// Rejects every credential. Used when no admin secret is configured.
pub struct DenyAll;

impl CredentialVerifier for DenyAll {
    fn verify(&self, _presented: &str) -> bool {
        false
    }
}

/// Verifier for an optional configured secret.
pub fn verifier_from_config(admin_token: Option<&str>) -> Arc<dyn CredentialVerifier> {
    match admin_token {
        Some(token) => Arc::new(SharedSecret::new(token)),
        None => Arc::new(DenyAll),
    }
}

/// Admin authentication layer: requires `Authorization: Bearer <secret>`.
pub async fn admin_auth_layer(
    verifier: Arc<dyn CredentialVerifier>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = bearer_token(&request)
        .map(|token| verifier.verify(token))
        .unwrap_or(false);

    if authorized {
        next.run(request).await
    } else {
        tracing::warn!("Rejected admin request to {}", request.uri().path());
        AppError::Unauthorized("Unauthorized".to_string()).into_response()
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
