use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account role stored as a single-character code in the database.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    #[serde(rename = "A")]
    Admin,
    #[serde(rename = "U")]
    Member,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "A",
            UserRole::Member => "U",
        }
    }

    /// Anything that is not the admin code counts as a plain member.
    pub fn from_code(code: &str) -> Self {
        match code {
            "A" => UserRole::Admin,
            _ => UserRole::Member,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub name: String,
    /// Argon2 hash, never the plain password.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
    pub is_actived: bool,
    pub is_verified_email: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub name: String,
    /// Already-hashed password.
    pub password: String,
    pub role: UserRole,
    pub is_actived: bool,
    pub is_verified_email: bool,
}

impl NewUser {
    /// Normalizes the email (also used as the login name) and trims the
    /// display name.
    #[must_use]
    pub fn new(email: String, name: String, password: String, role: UserRole) -> Self {
        let email = email.trim().to_lowercase();
        Self {
            username: email.clone(),
            email,
            name: name.trim().to_string(),
            password,
            role,
            is_actived: true,
            is_verified_email: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateUser {
    pub name: String,
    pub is_actived: bool,
}
