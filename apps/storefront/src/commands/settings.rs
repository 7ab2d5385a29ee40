//! # Settings Command
//!
//! The profile form: name, phone and an optional new password. Leaving the
//! password field empty keeps the current one.

use cozy_core::password::hash_password;
use cozy_core::validation::{validate_display_name, validate_password, validate_phone};
use cozy_core::User;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{DbState, SessionState};

/// Saves the profile form and refreshes the session.
///
/// ## Errors
/// * `UNAUTHORIZED` - Nobody is logged in
/// * `VALIDATION_ERROR` - Empty name or malformed phone
/// * `CONFLICT` - The phone belongs to another user
pub async fn update_settings(
    db: &DbState,
    session: &SessionState,
    name: &str,
    phone: &str,
    new_password: Option<&str>,
) -> Result<User, ApiError> {
    let user = session.require_user()?;
    let name = validate_display_name(name)?;
    let phone = validate_phone(phone)?;

    let password_hash = match new_password.filter(|p| !p.is_empty()) {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    debug!(
        user_id = user.id,
        password_changed = password_hash.is_some(),
        "update_settings command"
    );

    let updated = db
        .inner()
        .users()
        .update(user.id, &name, &phone, password_hash.as_deref())
        .await?;

    info!(user_id = updated.id, "Profile updated");
    session.sign_in(updated.clone());
    Ok(updated)
}
