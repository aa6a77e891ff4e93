use crate::{
    AppState,
    models::{DashboardSummary, JoinWaitlistRequest, LoginRequest, WaitlistResponse},
    session::SESSION_COOKIE,
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

/// AuthProviderSession
///
/// Minimal struct to deserialize the response from the external auth provider's
/// password-grant endpoint, specifically capturing the issued session token.
#[derive(Deserialize)]
struct AuthProviderSession {
    access_token: String,
}

/// is_valid_email
///
/// Basic `local@domain.tld` shape check used by the waitlist endpoint: exactly
/// one `@` separating a non-empty local part from a domain that carries a
/// non-empty dot-separated suffix, with no whitespace anywhere. Intentionally
/// no stricter than the form-level validation the signup UI performs.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// --- JSON API Handlers ---

/// join_waitlist
///
/// [Public Route] Accepts a waitlist signup `{ email, name?, role? }`.
///
/// *Dedup*: Lookup by email first; an existing address answers success-with-notice
/// rather than an error. These are idempotent-insert semantics: resubmitting a form
/// never creates a duplicate row and never reads as a failure to the visitor.
///
/// *Failure*: A broken lookup or insert answers 500 with an opaque message; only
/// the expected dedup path reveals that an address is already registered.
#[utoipa::path(
    post,
    path = "/api/waitlist",
    request_body = JoinWaitlistRequest,
    responses(
        (status = 200, description = "Joined (or already on) the waitlist", body = WaitlistResponse),
        (status = 400, description = "Missing or malformed email", body = WaitlistResponse),
        (status = 500, description = "Backend failure", body = WaitlistResponse)
    )
)]
pub async fn join_waitlist(
    State(state): State<AppState>,
    Json(payload): Json<JoinWaitlistRequest>,
) -> (StatusCode, Json<WaitlistResponse>) {
    let email = match payload.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email.to_owned(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(WaitlistResponse {
                    success: None,
                    error: Some("Email is required".to_string()),
                }),
            );
        }
    };

    if !is_valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(WaitlistResponse {
                success: None,
                error: Some("Invalid email format".to_string()),
            }),
        );
    }

    match state.repo.find_waitlist_entry(&email).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(WaitlistResponse {
                success: Some(true),
                error: Some("This email is already on the waitlist".to_string()),
            }),
        ),
        Ok(None) => match state
            .repo
            .insert_waitlist_entry(&email, payload.name, payload.role)
            .await
        {
            Ok(_) => (
                StatusCode::OK,
                Json(WaitlistResponse {
                    success: Some(true),
                    error: None,
                }),
            ),
            Err(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WaitlistResponse {
                    success: None,
                    error: Some(message),
                }),
            ),
        },
        Err(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(WaitlistResponse {
                success: None,
                error: Some(message),
            }),
        ),
    }
}

/// login
///
/// [Public Route] Exchanges credentials for a session cookie.
///
/// *Flow*: Calls the external auth provider's password-grant endpoint; the
/// provider verifies the credentials and issues the signed session token this
/// application later validates on every gated request. On success the token is
/// set as an HttpOnly cookie and the handler answers `{"success":true}`.
/// Credential rejection maps to 401; provider transport failure maps to 500.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established"),
        (status = 401, description = "Credentials rejected"),
        (status = 500, description = "Auth provider unreachable")
    )
)]
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let client = reqwest::Client::new();
    let token_url = format!(
        "{}/auth/v1/token?grant_type=password",
        state.config.auth_provider_url
    );

    let response = match client
        .post(token_url)
        .header("apikey", &state.config.auth_provider_key)
        .header("Content-Type", "application/json")
        .json(&serde_json::json!({ "email": payload.email, "password": payload.password }))
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("auth provider unreachable: {:?}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Authentication service unavailable" })),
            )
                .into_response();
        }
    };

    if !response.status().is_success() {
        // The provider rejected the credentials (wrong password, unknown account).
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid email or password" })),
        )
            .into_response();
    }

    let session = match response.json::<AuthProviderSession>().await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("malformed auth provider response: {:?}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Authentication service unavailable" })),
            )
                .into_response();
        }
    };

    // One week, matching the provider's refresh horizon. HttpOnly keeps the token
    // out of reach of page scripts.
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=604800",
        SESSION_COOKIE, session.access_token
    );

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

/// logout
///
/// [Public Route] Tears down the browser session by expiring the session cookie.
/// The token itself simply ages out at the provider; nothing is revoked here.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session cleared"))
)]
pub async fn logout() -> impl IntoResponse {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "success": true })),
    )
}

/// dashboard_summary
///
/// [Protected Route] The one live datum on the placeholder dashboard: total
/// waitlist signups. Protection comes from the gate middleware classifying
/// `/api/dashboard` as a protected prefix.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses((status = 200, description = "Summary", body = DashboardSummary))
)]
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, StatusCode> {
    match state.repo.count_waitlist_entries().await {
        Ok(waitlist_total) => Ok(Json(DashboardSummary { waitlist_total })),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

// --- Page Shell Handlers ---
//
// The marketing pages and the dashboard shell are presentational collaborators:
// each handler returns static markup. Copy, styling and animation live with the
// frontend assets and are deliberately not modeled here.

pub async fn home_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Provenance</title></head>\
         <body><h1>Provenance</h1>\
         <p>Scientific authentication for fine art. Join the waitlist for early access.</p>\
         <form method=\"post\" action=\"/api/waitlist\"><input name=\"email\" type=\"email\" placeholder=\"you@gallery.com\"><button>Join the waitlist</button></form>\
         </body></html>",
    )
}

pub async fn privacy_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Privacy Policy — Provenance</title></head>\
         <body><h1>Privacy Policy</h1><p>How we collect, store and use your data.</p></body></html>",
    )
}

pub async fn terms_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Terms of Service — Provenance</title></head>\
         <body><h1>Terms of Service</h1><p>The agreement governing use of Provenance.</p></body></html>",
    )
}

pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Sign in — Provenance</title></head>\
         <body><h1>Sign in</h1>\
         <form id=\"login\"><input name=\"email\" type=\"email\"><input name=\"password\" type=\"password\"><button>Sign in</button></form>\
         </body></html>",
    )
}

pub async fn signup_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Create account — Provenance</title></head>\
         <body><h1>Create account</h1>\
         <form id=\"signup\"><input name=\"email\" type=\"email\"><input name=\"password\" type=\"password\"><button>Create account</button></form>\
         </body></html>",
    )
}

pub async fn dashboard_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Dashboard — Provenance</title></head>\
         <body><h1>Dashboard</h1><p>Your authentication reports will appear here.</p></body></html>",
    )
}

pub async fn dashboard_settings_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Settings — Provenance</title></head>\
         <body><h1>Settings</h1><p>Account settings.</p></body></html>",
    )
}
