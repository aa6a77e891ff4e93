use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// Account
///
/// Represents the account's canonical identity record stored in the `public.profiles`
/// table. This structure includes the minimal data consulted during session verification.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Account {
    // Primary Key, also the Foreign Key to the external auth provider's user record.
    pub id: Uuid,
    // The account's primary identifier.
    pub email: String,
    // Coarse account tier, currently 'member' for every dashboard user.
    pub role: String,
}

/// WaitlistEntry
///
/// Represents one signup record from the `public.waitlist` table. `email` is
/// unique at the database level; `name` and `role` are optional form fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,

    // Timestamp handling for database integration and JSON serialization.
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// --- Request Payloads (Input Schemas) ---

/// JoinWaitlistRequest
///
/// Input payload for the waitlist signup endpoint (POST /api/waitlist).
///
/// `email` is declared optional so that a missing field reaches the handler's
/// own validation and produces the documented "Email is required" response
/// instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct JoinWaitlistRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// LoginRequest
///
/// Input payload for the session login endpoint (POST /api/auth/login).
/// Note: The password is only passed through to the external auth provider and never
/// persisted or logged internally by this application.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// --- Response Schemas (Output) ---

/// WaitlistResponse
///
/// Output envelope for the waitlist signup endpoint. Absent fields are omitted
/// from the JSON body, so the three documented shapes are exactly
/// `{"success":true}`, `{"success":true,"error":...}` (duplicate notice) and
/// `{"error":...}` (rejection or backend failure).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct WaitlistResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// DashboardSummary
///
/// Output schema for the placeholder dashboard (GET /api/dashboard/summary).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardSummary {
    pub waitlist_total: i64,
}
