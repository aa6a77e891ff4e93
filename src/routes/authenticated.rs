use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Defines the routes inside the gate's protected zone (`/dashboard` and
/// `/api/dashboard` prefixes). No per-handler credential check is needed here:
/// the gate middleware classifies these paths as protected and redirects
/// unauthenticated requests to the login target before routing runs, so every
/// handler below only ever executes for a verified session.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /dashboard
        // The placeholder dashboard shell shown after login.
        .route("/dashboard", get(handlers::dashboard_page))
        // GET /dashboard/settings
        // Account settings shell, demonstrating that the whole /dashboard
        // sub-tree shares the protected classification.
        .route("/dashboard/settings", get(handlers::dashboard_settings_page))
        // GET /api/dashboard/summary
        // The dashboard's one live datum: total waitlist signups.
        .route("/api/dashboard/summary", get(handlers::dashboard_summary))
}
