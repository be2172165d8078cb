//! # Access Gate
//!
//! Credential checks guarding the terminal.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  login(username, password, role)                                │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  CredentialStore::verify ← exact triple match against `users`   │
//! │       │                                                         │
//! │       ├── Authorized { role } → session proceeds                │
//! │       └── Denied → AuthError::InvalidCredentials                │
//! │                    (never says which field mismatched)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are stored and compared in plaintext, matching the
//! reference deployment. The [`CredentialStore`] trait is the seam: a
//! hashed store can replace [`SqliteCredentialStore`] without touching
//! the gate or its callers.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{AuthError, DbResult, PersistenceError};
use rasoi_core::{AuthOutcome, Role};

/// Looks up a credential triple and reports a typed outcome.
pub trait CredentialStore {
    /// Checks whether the exact (username, password, role) triple
    /// exists. A store error is distinct from a denial.
    fn verify(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> impl std::future::Future<Output = DbResult<AuthOutcome>> + Send;
}

/// Credential store over the `users` table.
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Creates a new SqliteCredentialStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCredentialStore { pool }
    }

    /// Inserts a user; duplicate usernames are a
    /// [`UniqueViolation`](PersistenceError::UniqueViolation).
    pub async fn add_user(&self, username: &str, password: &str, role: Role) -> DbResult<()> {
        sqlx::query("INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)")
            .bind(username)
            .bind(password)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Number of registered users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl CredentialStore for SqliteCredentialStore {
    async fn verify(&self, username: &str, password: &str, role: Role) -> DbResult<AuthOutcome> {
        debug!(username = %username, role = %role, "Verifying credentials");

        let matched: Option<String> = sqlx::query_scalar(
            r#"
            SELECT role FROM users
            WHERE username = ?1 AND password = ?2 AND role = ?3
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match matched {
            Some(stored) => {
                let role = stored.parse().map_err(PersistenceError::Corrupt)?;
                Ok(AuthOutcome::Authorized { role })
            }
            None => Ok(AuthOutcome::Denied),
        }
    }
}

/// The login entry point used by the terminal.
#[derive(Debug, Clone)]
pub struct AccessGate<S> {
    store: S,
}

impl<S: CredentialStore> AccessGate<S> {
    /// Creates a gate over the given credential store.
    pub fn new(store: S) -> Self {
        AccessGate { store }
    }

    /// Authenticates a user, returning the granted role.
    pub async fn login(&self, username: &str, password: &str, role: Role) -> Result<Role, AuthError> {
        match self.store.verify(username, password, role).await? {
            AuthOutcome::Authorized { role } => {
                info!(username = %username, role = %role, "Login accepted");
                Ok(role)
            }
            AuthOutcome::Denied => {
                warn!(username = %username, "Login denied");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn gate_with_admin() -> (Database, AccessGate<SqliteCredentialStore>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteCredentialStore::new(db.pool().clone());
        store.add_user("admin", "admin123", Role::Admin).await.unwrap();
        let gate = db.access_gate();
        (db, gate)
    }

    #[tokio::test]
    async fn exact_triple_is_accepted() {
        let (_db, gate) = gate_with_admin().await;
        let role = gate.login("admin", "admin123", Role::Admin).await.unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_is_denied() {
        let (_db, gate) = gate_with_admin().await;
        let err = gate.login("admin", "admin124", Role::Admin).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn right_password_wrong_role_is_denied() {
        let (_db, gate) = gate_with_admin().await;
        let err = gate
            .login("admin", "admin123", Role::Cashier)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_user_is_denied() {
        let (_db, gate) = gate_with_admin().await;
        let err = gate
            .login("nobody", "admin123", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let (db, _gate) = gate_with_admin().await;
        let store = SqliteCredentialStore::new(db.pool().clone());
        let err = store
            .add_user("admin", "other", Role::Cashier)
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::UniqueViolation { .. }));
    }
}
