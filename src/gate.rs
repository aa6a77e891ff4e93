use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;

use crate::AppState;

/// GateConfig
///
/// The route zones and redirect targets consumed by the authorization gate.
/// Both path collections are plain typed sets constructed once at startup and
/// treated as immutable configuration for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct GateConfig {
    /// Routes meaningful only to unauthenticated visitors (exact match).
    pub auth_only_paths: HashSet<String>,
    /// Routes requiring an authenticated session (prefix match).
    pub protected_path_prefixes: Vec<String>,
    /// Where unauthenticated requests for protected routes are sent.
    pub login_redirect: String,
    /// Where authenticated requests for auth-only routes are sent.
    pub authenticated_redirect: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            auth_only_paths: ["/login", "/signup"]
                .into_iter()
                .map(String::from)
                .collect(),
            protected_path_prefixes: vec!["/dashboard".to_string(), "/api/dashboard".to_string()],
            login_redirect: "/login".to_string(),
            authenticated_redirect: "/dashboard".to_string(),
        }
    }
}

/// RouteClass
///
/// The three mutually exclusive zones a request path can fall into. Paths not
/// matched by either configured list are implicitly `Public` and pass through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// Login/signup entry points, meaningful only to unauthenticated visitors.
    AuthOnly,
    /// Dashboard and its sub-paths, requiring an authenticated session.
    Protected,
    /// Everything else.
    Public,
}

/// Disposition
///
/// The gate's decision output for one request. `Redirect` carries the fixed
/// target path and is answered as a `302 Found`; there are no other side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    Allow,
    Redirect(String),
}

/// canonicalize
///
/// Normalizes a request path for classification and loop-guard comparison:
/// the query string is dropped and trailing slashes are trimmed, so that
/// `/dashboard/` and `/dashboard?tab=scans` compare equal to `/dashboard`.
pub fn canonicalize(path: &str) -> &str {
    let path = match path.find('?') {
        Some(idx) => &path[..idx],
        None => path,
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// classify
///
/// Maps a request path to exactly one `RouteClass`. A protected prefix match
/// takes precedence over an auth-only exact match; the two lists are expected
/// to be disjoint by configuration, but precedence removes the ambiguity.
/// Pure function of the path: no I/O, no failure mode.
pub fn classify(config: &GateConfig, path: &str) -> RouteClass {
    let path = canonicalize(path);
    if config
        .protected_path_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
    {
        return RouteClass::Protected;
    }
    if config.auth_only_paths.contains(path) {
        return RouteClass::AuthOnly;
    }
    RouteClass::Public
}

/// decide
///
/// The core decision table. Combines the resolved session state with the route
/// classification and produces a `Disposition`:
///
/// - authenticated + auth-only  -> redirect to the authenticated landing area
/// - unauthenticated + protected -> redirect to the login target
/// - every other combination     -> allow
///
/// Loop guard: a would-be redirect whose canonicalized target equals the
/// canonicalized current path degrades to `Allow`, so a misconfigured target
/// can never produce an infinite redirect cycle.
///
/// Total and deterministic over `(path, authenticated)`; this function cannot
/// fail, because all fallibility is absorbed by the session resolver.
pub fn decide(config: &GateConfig, authenticated: bool, path: &str) -> Disposition {
    let target = match (authenticated, classify(config, path)) {
        (true, RouteClass::AuthOnly) => Some(&config.authenticated_redirect),
        (false, RouteClass::Protected) => Some(&config.login_redirect),
        _ => None,
    };

    match target {
        Some(target) if canonicalize(target) != canonicalize(path) => {
            Disposition::Redirect(target.clone())
        }
        _ => Disposition::Allow,
    }
}

/// gate
///
/// The middleware adapter around the pure decision core. It resolves the
/// caller's session state (a single awaited verification; failures read as
/// unauthenticated), runs the decision table against the requested path, and
/// either passes the request through unchanged or answers a `302 Found`
/// pointing at the fixed redirect target.
///
/// Each request is classified independently; the gate holds no cross-request
/// state, so retries and concurrent requests cannot influence each other.
pub async fn gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let authenticated = state.sessions.session_state(request.headers()).await;

    match decide(&state.config.gate, authenticated, &path) {
        Disposition::Allow => next.run(request).await,
        Disposition::Redirect(target) => {
            tracing::debug!(%path, %target, authenticated, "gate redirect");
            (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
        }
    }
}
