use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are served to any client. This covers the marketing
/// site proper (home, legal documents), the auth-only entry pages (the gate
/// redirects authenticated visitors away from them), the waitlist signup API,
/// and session establishment/teardown.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // The marketing landing page, carrying the waitlist signup form.
        .route("/", get(handlers::home_page))
        // GET /legal/privacy, GET /legal/terms
        // Legal document shells. Content management for these pages is out of scope;
        // the handlers return the rendered markup.
        .route("/legal/privacy", get(handlers::privacy_page))
        .route("/legal/terms", get(handlers::terms_page))
        // GET /login, GET /signup
        // Auth-only entry pages. Authenticated visitors never see these: the gate
        // answers a redirect to the dashboard before routing reaches them.
        .route("/login", get(handlers::login_page))
        .route("/signup", get(handlers::signup_page))
        // POST /api/waitlist
        // Waitlist signup with idempotent-insert semantics: a duplicate email
        // answers success-with-notice and creates no second row.
        .route("/api/waitlist", post(handlers::join_waitlist))
        // POST /api/auth/login
        // Exchanges credentials for a session cookie via the external auth provider.
        .route("/api/auth/login", post(handlers::login))
        // POST /api/auth/logout
        // Expires the session cookie.
        .route("/api/auth/logout", post(handlers::logout))
}
