//! Authenticated user claims carried in the identity cookie.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserRole};
use crate::models::config::ServerConfig;

/// How long a login stays valid.
const SESSION_TTL_DAYS: i64 = 7;

/// JWT claims describing the logged-in account. Stored as the identity id
/// string on login and decoded back by the [`FromRequest`] extractor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// User id, stringified per JWT convention.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Self {
        let exp = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize;
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp,
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let secret = req
            .app_data::<web::Data<ServerConfig>>()
            .map(|config| config.secret.clone());

        let user = identity
            .and_then(|id| id.id().map_err(Error::from))
            .ok()
            .zip(secret)
            .and_then(|(token, secret)| Self::from_jwt(&token, &secret).ok());

        match user {
            Some(user) => ready(Ok(user)),
            None => ready(Err(ErrorUnauthorized("authentication required"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        let now = Utc::now().naive_utc();
        User {
            id: 42,
            email: "admin@himatika.org".to_string(),
            username: "admin@himatika.org".to_string(),
            name: "Admin".to_string(),
            password: "hash".to_string(),
            role: UserRole::Admin,
            is_actived: true,
            is_verified_email: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn claims_round_trip_through_jwt() {
        let claims = AuthenticatedUser::from_user(&sample_user());
        let token = claims.to_jwt("0123456789abcdef").unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, "0123456789abcdef").unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.user_id(), Some(42));
        assert!(decoded.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = AuthenticatedUser::from_user(&sample_user());
        let token = claims.to_jwt("0123456789abcdef").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "another-secret!!").is_err());
    }
}
