use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser, UserRole,
};

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub name: String,
    pub password: String,
    pub role: String,
    pub is_actived: bool,
    pub is_verified_email: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub is_actived: bool,
    pub is_verified_email: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Data used when updating a [`User`] record.
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub is_actived: bool,
    pub updated_at: NaiveDateTime,
}

impl From<User> for DomainUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            name: user.name,
            password: user.password,
            role: UserRole::from_code(&user.role),
            is_actived: user.is_actived,
            is_verified_email: user.is_verified_email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            email: &user.email,
            username: &user.username,
            name: &user.name,
            password: &user.password,
            role: user.role.as_str(),
            is_actived: user.is_actived,
            is_verified_email: user.is_verified_email,
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        Self {
            name: &user.name,
            is_actived: user.is_actived,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
