use crate::db::DbPool;
use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::PublicId;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::listing::{ListPage, PageRequest, SortSpec, WhereClause};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod event;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod user;

/// One fully resolved listing request: the assembled filter clause, the
/// whitelisted sort and the requested page.
#[derive(Debug)]
pub struct ListQuery {
    pub clause: WhereClause,
    pub sort: SortSpec,
    pub page: PageRequest,
}

pub trait EventReader {
    fn get_event_by_public_id(&self, public_id: &PublicId) -> RepositoryResult<Option<Event>>;
    fn list_events(&self, query: &ListQuery) -> RepositoryResult<ListPage<Event>>;
}

pub trait EventWriter {
    fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event>;
    fn update_event(&self, public_id: &PublicId, updates: &UpdateEvent)
    -> RepositoryResult<Event>;
    fn delete_event(&self, public_id: &PublicId) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: &ListQuery) -> RepositoryResult<ListPage<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    fn update_user_password(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
    fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of all repository traits.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
