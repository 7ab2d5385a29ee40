//! # User Repository
//!
//! Accounts, login and profile updates.
//!
//! ## Login Flow
//! ```text
//! authenticate(phone, password)
//!      │
//!      ▼
//! SELECT ... WHERE phone = ?  ──── no row ───► Ok(None)
//!      │
//!      ▼
//! verify_password(password, stored)  ── mismatch ──► Ok(None)
//!      │
//!      ├── stored is plaintext (old release)? ──► rehash with Argon2, UPDATE
//!      ▼
//! Ok(Some(User))
//! ```

use chrono::Utc;
use cozy_core::password::{hash_password, is_legacy, verify_password};
use cozy_core::{NewUser, User};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};

const USER_COLUMNS: &str = "id, phone, role, name, created_at";

/// A user row together with its stored credential.
#[derive(Debug, sqlx::FromRow)]
struct StoredUser {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks a user up by login phone.
    pub async fn get_by_phone(&self, phone: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone = ?"
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Number of registered users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Registers a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored user with its generated id
    /// * `Err(DbError::UniqueViolation)` - Phone already registered
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<User> {
        debug!(phone = %new_user.phone, role = %new_user.role, "Inserting user");

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (phone, password_hash, role, name, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.phone)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .bind(&new_user.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&new_user.phone))?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Updates name, phone and optionally the password.
    ///
    /// `password_hash` of `None` keeps the current credential.
    ///
    /// ## Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DbError::NotFound)` - No such user
    /// * `Err(DbError::UniqueViolation)` - Phone belongs to someone else
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        phone: &str,
        password_hash: Option<&str>,
    ) -> DbResult<User> {
        debug!(
            user_id = id,
            password_changed = password_hash.is_some(),
            "Updating user"
        );

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = ?, phone = ?, password_hash = COALESCE(?, password_hash) \
             WHERE id = ? RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(phone)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(phone))?;

        user.ok_or_else(|| DbError::not_found("User", id))
    }

    /// Checks a phone/password pair.
    ///
    /// Returns `Ok(None)` for an unknown phone or a wrong password; the two
    /// cases are not distinguished.
    pub async fn authenticate(&self, phone: &str, password: &str) -> DbResult<Option<User>> {
        let stored = sqlx::query_as::<_, StoredUser>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE phone = ?"
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        let Some(stored) = stored else {
            debug!("Login for unknown phone");
            return Ok(None);
        };

        if !verify_password(password, &stored.password_hash) {
            debug!(user_id = stored.user.id, "Password mismatch");
            return Ok(None);
        }

        if is_legacy(&stored.password_hash) {
            self.upgrade_legacy_password(stored.user.id, password).await?;
        }

        Ok(Some(stored.user))
    }

    /// Replaces a plaintext credential with an Argon2 hash.
    ///
    /// A failure here does not block the login it was triggered by.
    async fn upgrade_legacy_password(&self, id: i64, password: &str) -> DbResult<()> {
        let hash = match hash_password(password) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(user_id = id, error = %e, "Could not hash legacy password");
                return Ok(());
            }
        };

        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(&hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!(user_id = id, "Upgraded plaintext password to Argon2");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
