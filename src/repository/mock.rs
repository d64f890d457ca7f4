//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::PublicId;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::listing::ListPage;
use crate::repository::errors::RepositoryResult;
use crate::repository::{EventReader, EventWriter, ListQuery, UserReader, UserWriter};

mock! {
    pub Repository {}

    impl EventReader for Repository {
        fn get_event_by_public_id(&self, public_id: &PublicId) -> RepositoryResult<Option<Event>>;
        fn list_events(&self, query: &ListQuery) -> RepositoryResult<ListPage<Event>>;
    }

    impl EventWriter for Repository {
        fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event>;
        fn update_event(
            &self,
            public_id: &PublicId,
            updates: &UpdateEvent,
        ) -> RepositoryResult<Event>;
        fn delete_event(&self, public_id: &PublicId) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: &ListQuery) -> RepositoryResult<ListPage<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
        fn update_user_password(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
        fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
    }
}
