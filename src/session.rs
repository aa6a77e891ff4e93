use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    repository::RepositoryState,
};

/// Name of the cookie carrying the session token issued at login.
pub const SESSION_COOKIE: &str = "pp_session";

/// Upper bound on the account-confirmation lookup. A verification that takes
/// longer than this reads as unauthenticated for the current request; the next
/// request re-verifies from scratch.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Claims
///
/// Represents the standard payload structure expected inside a session token (JWT).
/// These claims are signed by the authentication provider's secret and validated
/// upon every incoming request the gate evaluates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): The UUID of the account. This is the key used to confirm
    /// the account still exists in the public.profiles table.
    pub sub: Uuid,
    /// Expiration Time (exp): Timestamp after which the token must not be accepted.
    /// This is crucial for preventing replay attacks and maintaining session freshness.
    pub exp: usize,
    /// Issued At (iat): Timestamp when the token was issued.
    pub iat: usize,
}

/// SessionVerifier
///
/// The seam between the authorization gate and the session provider. Given the
/// header bag of an incoming request, an implementation answers one question:
/// does this request carry a valid session?
///
/// Contract: always returns a boolean and never raises. Expired tokens,
/// malformed tokens, provider failures, and timeouts all collapse to `false`
/// at this boundary; callers never observe the failure reason.
///
/// The verifier is injected through the application state (`Arc<dyn ...>`)
/// rather than held as a process-wide singleton, which keeps tests free to
/// substitute fakes per request.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn session_state(&self, headers: &HeaderMap) -> bool;
}

/// SessionState
///
/// The concrete type used to share the session verifier across the application state.
pub type SessionState = Arc<dyn SessionVerifier>;

/// JwtSessionVerifier
///
/// The production implementation. Verification runs in two steps:
/// 1. Token Validation: the session cookie (or a Bearer header fallback) is
///    decoded against the provider-managed secret with expiry checking active.
/// 2. Account Confirmation: the token subject must still map to a live row in
///    `public.profiles`, so a deleted account cannot ride an unexpired token.
///
/// The account lookup is a single attempt bounded by `LOOKUP_TIMEOUT`.
pub struct JwtSessionVerifier {
    decoding_key: DecodingKey,
    repo: RepositoryState,
    env: Env,
}

impl JwtSessionVerifier {
    /// Constructs the verifier from the loaded configuration and the shared repository.
    pub fn new(config: &AppConfig, repo: RepositoryState) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.session_jwt_secret.as_bytes()),
            repo,
            env: config.env.clone(),
        }
    }

    /// token_from_headers
    ///
    /// Extracts the raw session token from the request's header bag. The session
    /// cookie is the primary carrier; an `Authorization: Bearer` header is accepted
    /// as a fallback for non-browser clients.
    fn token_from_headers(headers: &HeaderMap) -> Option<String> {
        if let Some(cookie_header) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
            for pair in cookie_header.split(';') {
                if let Some((name, value)) = pair.trim().split_once('=') {
                    if name == SESSION_COOKIE && !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }

        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string)
    }

    /// resolve
    ///
    /// The fallible interior of verification. A request without a token is simply
    /// unauthenticated (`Ok(false)`); everything that goes wrong past that point
    /// is an `Err` carrying the reason, which the public contract collapses.
    async fn resolve(&self, headers: &HeaderMap) -> Result<bool, String> {
        let token = match Self::token_from_headers(headers) {
            Some(token) => token,
            None => return Ok(false),
        };

        let mut validation = Validation::default();

        // Ensure expiration time validation is always active.
        validation.validate_exp = true;

        let token_data = decode::<Claims>(&token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                // Token expired: the most common failure for a valid-but-old token.
                ErrorKind::ExpiredSignature => "session token expired".to_string(),
                // All other failure types (bad signature, malformed token, etc.).
                kind => format!("session token rejected: {:?}", kind),
            }
        })?;

        // Account Confirmation (bounded, single attempt). A timeout reads exactly
        // like any other verification failure for this request.
        let account = tokio::time::timeout(LOOKUP_TIMEOUT, self.repo.get_account(token_data.claims.sub))
            .await
            .map_err(|_| "account confirmation timed out".to_string())?;

        Ok(account.is_some())
    }
}

#[async_trait]
impl SessionVerifier for JwtSessionVerifier {
    /// session_state
    ///
    /// The public boolean contract. In `Env::Local` a request may authenticate by
    /// naming a known account UUID in the `x-session-user` header, which accelerates
    /// development but is guarded by the Env check. Otherwise the standard
    /// token-validation flow runs, with every failure surfaced only as `false`.
    async fn session_state(&self, headers: &HeaderMap) -> bool {
        if self.env == Env::Local {
            if let Some(raw) = headers.get("x-session-user").and_then(|v| v.to_str().ok()) {
                if let Ok(account_id) = Uuid::parse_str(raw) {
                    // The UUID must still map to an actual account row so the bypass
                    // cannot mint sessions for accounts that do not exist.
                    if self.repo.get_account(account_id).await.is_some() {
                        return true;
                    }
                }
            }
        }
        // If Env is Production, or if the bypass did not apply, execution falls
        // through to the standard token verification flow.

        match self.resolve(headers).await {
            Ok(authenticated) => authenticated,
            Err(reason) => {
                tracing::debug!(%reason, "session verification failed; treating request as anonymous");
                false
            }
        }
    }
}

/// MockSessionVerifier
///
/// A mock implementation of `SessionVerifier` used exclusively for unit and
/// integration testing. The fixed variants pin the resolved session state; the
/// failing variant simulates a provider outage, which per the resolver contract
/// must read as unauthenticated.
#[derive(Clone)]
pub struct MockSessionVerifier {
    authenticated: bool,
    /// When true, every verification simulates a provider failure.
    pub should_fail: bool,
}

impl MockSessionVerifier {
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            should_fail: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            should_fail: false,
        }
    }

    pub fn new_failing() -> Self {
        Self {
            authenticated: false,
            should_fail: true,
        }
    }
}

#[async_trait]
impl SessionVerifier for MockSessionVerifier {
    async fn session_state(&self, _headers: &HeaderMap) -> bool {
        if self.should_fail {
            tracing::debug!("mock session provider failure; treating request as anonymous");
            return false;
        }
        self.authenticated
    }
}
