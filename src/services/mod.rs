//! Application workflows sitting between the HTTP routes and the
//! repository. Every admin operation re-checks the caller's role here, not
//! in the route handlers.

use thiserror::Error;
use validator::ValidationErrors;

use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod email;
pub mod events;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "Invalid input".to_string());
        ServiceError::Form(message)
    }
}

/// Gate for the admin area.
pub fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    fn user_with_role(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "x@y.z".to_string(),
            name: "X".to_string(),
            role,
            exp: 0,
        }
    }

    #[test]
    fn ensure_admin_rejects_members() {
        assert!(ensure_admin(&user_with_role(UserRole::Admin)).is_ok());
        assert!(matches!(
            ensure_admin(&user_with_role(UserRole::Member)),
            Err(ServiceError::Unauthorized)
        ));
    }
}
