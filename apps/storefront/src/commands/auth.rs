//! # Auth Commands
//!
//! Registration and login. A successful call puts the user in the
//! [`SessionState`]; every other command reads it from there.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Login window                                                           │
//! │                                                                         │
//! │  phone + password                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  users().authenticate(phone, password)                                  │
//! │       │                                                                 │
//! │       ├── None ──────► UNAUTHORIZED "Invalid phone or password"         │
//! │       │                                                                 │
//! │       └── Some(user) ► session.sign_in(user) ► open the catalog         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cozy_core::password::hash_password;
use cozy_core::validation::{validate_display_name, validate_password, validate_phone};
use cozy_core::{CoreError, NewUser, User, UserRole};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{DbState, SessionState};

/// Creates an account and logs it in.
///
/// ## Arguments
/// * `role` - `"buyer"` or `"seller"`, as picked in the form
///
/// ## Errors
/// * `VALIDATION_ERROR` - Empty or malformed field, unknown role
/// * `CONFLICT` - The phone is already registered
pub async fn register(
    db: &DbState,
    session: &SessionState,
    name: &str,
    phone: &str,
    password: &str,
    role: &str,
) -> Result<User, ApiError> {
    let name = validate_display_name(name)?;
    let phone = validate_phone(phone)?;
    validate_password(password)?;
    let role: UserRole = role.parse()?;

    debug!(phone = %phone, role = %role, "register command");

    let new_user = NewUser {
        name,
        phone,
        password_hash: hash_password(password)?,
        role,
    };
    let user = db.inner().users().insert(&new_user).await?;

    session.sign_in(user.clone());
    Ok(user)
}

/// Checks credentials and starts a session.
pub async fn login(
    db: &DbState,
    session: &SessionState,
    phone: &str,
    password: &str,
) -> Result<User, ApiError> {
    let phone = phone.trim();
    if phone.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Enter both phone and password"));
    }

    let user = db
        .inner()
        .users()
        .authenticate(phone, password)
        .await?
        .ok_or(CoreError::InvalidCredentials)?;

    info!(user_id = user.id, role = %user.role, "User logged in");
    session.sign_in(user.clone());
    Ok(user)
}

pub async fn logout(session: &SessionState) {
    if let Some(user) = session.sign_out() {
        info!(user_id = user.id, "User logged out");
    }
}

pub async fn current_user(session: &SessionState) -> Option<User> {
    session.current()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::TestApp;
    use crate::error::ErrorCode;
    use cozy_db::seed::{SEED_SELLER_PASSWORD, SEED_SELLER_PHONE};

    #[tokio::test]
    async fn test_seed_seller_logs_in() {
        let app = TestApp::new().await;

        let user = login(&app.db, &app.session, SEED_SELLER_PHONE, SEED_SELLER_PASSWORD)
            .await
            .unwrap();

        assert!(user.is_seller());
        assert_eq!(current_user(&app.session).await, Some(user));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = TestApp::new().await;

        let err = login(&app.db, &app.session, SEED_SELLER_PHONE, "wrong")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(current_user(&app.session).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_phone_is_unauthorized() {
        let app = TestApp::new().await;

        let err = login(&app.db, &app.session, "+70000000000", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let app = TestApp::new().await;

        let user = register(&app.db, &app.session, " Anna ", "+7 900 111-22-33", "pw", "Buyer")
            .await
            .unwrap();
        assert_eq!(user.name, "Anna");
        assert_eq!(user.role, UserRole::Buyer);
        assert_eq!(current_user(&app.session).await.map(|u| u.id), Some(user.id));

        logout(&app.session).await;
        assert!(current_user(&app.session).await.is_none());

        let again = login(&app.db, &app.session, "+7 900 111-22-33", "pw")
            .await
            .unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_conflict() {
        let app = TestApp::new().await;
        let before = app.db.inner().users().count().await.unwrap();

        let err = register(&app.db, &app.session, "Copy", SEED_SELLER_PHONE, "pw", "buyer")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.contains(SEED_SELLER_PHONE));
        assert_eq!(app.db.inner().users().count().await.unwrap(), before);
        assert!(current_user(&app.session).await.is_none());
    }

    #[tokio::test]
    async fn test_register_validation() {
        let app = TestApp::new().await;

        for (name, phone, password, role) in [
            ("", "+7900", "pw", "buyer"),
            ("Anna", "", "pw", "buyer"),
            ("Anna", "phone", "pw", "buyer"),
            ("Anna", "+7900", "", "buyer"),
            ("Anna", "+7900", "pw", "admin"),
        ] {
            let err = register(&app.db, &app.session, name, phone, password, role)
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{name:?} {phone:?} {role:?}");
        }

        assert_eq!(app.db.inner().users().count().await.unwrap(), 1);
    }
}
