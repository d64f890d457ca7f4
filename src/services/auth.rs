//! Login and password workflows.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;
use rand::distr::Alphanumeric;
use validator::Validate;

use crate::domain::user::User;
use crate::forms::auth::{ChangePasswordForm, LoginForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Length of generated one-time passwords mailed to new admins.
const GENERATED_PASSWORD_LEN: usize = 8;

pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Form(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Random alphanumeric password for freshly created admin accounts.
pub fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

/// Checks the credentials and account status. All credential failures
/// collapse into the same message so usernames cannot be probed.
pub fn login<R>(repo: &R, form: &LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    form.validate()?;

    let user = repo.get_user_by_username(form.username.trim())?;

    let user = match user {
        Some(user) if verify_password(&form.password, &user.password) => user,
        _ => {
            return Err(ServiceError::Form(
                "Invalid username or password".to_string(),
            ));
        }
    };

    if !user.is_verified_email {
        return Err(ServiceError::Form("Please verify your email".to_string()));
    }
    if !user.is_actived {
        return Err(ServiceError::Form("Your account inactive".to_string()));
    }

    Ok(user)
}

/// Re-checks the current password, enforces the strength policy and stores
/// the new hash.
pub fn change_password<R>(repo: &R, user_id: i32, form: &ChangePasswordForm) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.validate()?;

    let user = repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;

    if !verify_password(&form.password, &user.password) {
        return Err(ServiceError::Form("Invalid current password".to_string()));
    }

    let hash = hash_password(&form.new_password)?;
    repo.update_user_password(user.id, &hash)?;

    Ok(())
}
