use crate::models::{Account, WaitlistEntry};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers and the session
/// verifier to interact with the data layer without knowing the specific
/// implementation (Postgres, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable and usable across Axum's
/// asynchronous task boundaries.
///
/// Error shape: the waitlist methods surface backend failure to their callers
/// (the submission handler must answer 500 on a broken lookup or insert), so
/// they return `Result`. The account lookup backs session verification, where
/// any failure must read as "no account"; it swallows errors to `None`.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Waitlist ---
    // Dedup lookup by email. `Ok(None)` means the address is new.
    async fn find_waitlist_entry(&self, email: &str) -> Result<Option<WaitlistEntry>, String>;
    // Inserts a new signup row. The caller is expected to have run the dedup lookup first.
    async fn insert_waitlist_entry(
        &self,
        email: &str,
        name: Option<String>,
        role: Option<String>,
    ) -> Result<WaitlistEntry, String>;
    // Total signups, surfaced on the placeholder dashboard.
    async fn count_waitlist_entries(&self) -> Result<i64, String>;

    // --- Accounts / Sessions ---
    async fn get_account(&self, id: Uuid) -> Option<Account>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// find_waitlist_entry
    ///
    /// Dedup lookup for the submission endpoint. The underlying database error is
    /// logged here; the caller only sees an opaque failure message, so a broken
    /// lookup cannot leak whether the address exists.
    async fn find_waitlist_entry(&self, email: &str) -> Result<Option<WaitlistEntry>, String> {
        sqlx::query_as::<_, WaitlistEntry>(
            r#"SELECT id, email, name, role, created_at, updated_at
               FROM waitlist
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("find_waitlist_entry error: {:?}", e);
            "waitlist lookup failed".to_string()
        })
    }

    /// insert_waitlist_entry
    ///
    /// Inserts the signup row and returns it. Uniqueness of `email` is also
    /// enforced by the database; a violation surfaces as the generic backend
    /// failure since the dedup path is the lookup above.
    async fn insert_waitlist_entry(
        &self,
        email: &str,
        name: Option<String>,
        role: Option<String>,
    ) -> Result<WaitlistEntry, String> {
        sqlx::query_as::<_, WaitlistEntry>(
            r#"INSERT INTO waitlist (id, email, name, role, created_at, updated_at)
               VALUES ($1, $2, $3, $4, NOW(), NOW())
               RETURNING id, email, name, role, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("insert_waitlist_entry error: {:?}", e);
            "waitlist insert failed".to_string()
        })
    }

    /// count_waitlist_entries
    ///
    /// Single counter consumed by the dashboard summary endpoint.
    async fn count_waitlist_entries(&self) -> Result<i64, String> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM waitlist")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("count_waitlist_entries error: {:?}", e);
                "waitlist count failed".to_string()
            })
    }

    /// get_account
    ///
    /// Retrieves the account row consulted during session verification. Query
    /// failure reads as "no account", which keeps the verifier's
    /// never-raises contract intact.
    async fn get_account(&self, id: Uuid) -> Option<Account> {
        sqlx::query_as::<_, Account>("SELECT id, email, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_account error: {:?}", e);
                None
            })
    }
}
