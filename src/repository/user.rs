use std::cell::RefCell;

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::db::get_connection;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::listing::{
    self, CountRow, FilterField, ListPage, RowStore, SortSpec, WhereClause, fetch_page,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ListQuery, UserReader, UserWriter};

/// Recognized query parameters of the users listing.
pub const USER_FILTERS: &[FilterField] = &[
    FilterField::like("search", &["email", "name"]),
    FilterField::text("role", "role"),
    FilterField::flag("is_actived", "is_actived"),
    FilterField::flag("is_verified_email", "is_verified_email"),
];

/// Columns the users listing may be sorted by; the first is the default.
pub const USER_SORT_FIELDS: &[&str] = &[
    "id",
    "email",
    "username",
    "name",
    "is_actived",
    "is_verified_email",
    "role",
];

const USER_COLUMNS: &str = "id, email, username, name, password, role, is_actived, \
     is_verified_email, created_at, updated_at";

struct UserRows<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl RowStore for UserRows<'_> {
    type Row = crate::models::user::User;

    fn count(&self, clause: &WhereClause) -> RepositoryResult<i64> {
        let mut conn = self.conn.borrow_mut();
        let query = diesel::sql_query(listing::count_sql("users", clause)).into_boxed();
        let row: CountRow = listing::bind_clause(query, clause).get_result(&mut **conn)?;
        Ok(row.count)
    }

    fn select(
        &self,
        clause: &WhereClause,
        sort: &SortSpec,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Self::Row>> {
        let mut conn = self.conn.borrow_mut();
        let query = diesel::sql_query(listing::select_sql(USER_COLUMNS, "users", clause, sort))
            .into_boxed();
        let rows = listing::bind_clause(query, clause)
            .bind::<BigInt, _>(limit)
            .bind::<BigInt, _>(offset)
            .load(&mut **conn)?;
        Ok(rows)
    }
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = get_connection(self.pool())?;
        let user = users::table
            .find(id)
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = get_connection(self.pool())?;
        let user = users::table
            .filter(users::username.eq(username))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users(&self, query: &ListQuery) -> RepositoryResult<ListPage<User>> {
        let mut conn = get_connection(self.pool())?;
        let store = UserRows {
            conn: RefCell::new(&mut conn),
        };

        let page = fetch_page(&store, &query.clause, &query.sort, query.page)?;

        Ok(ListPage {
            rows: page.rows.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            last_page: page.last_page,
        })
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = get_connection(self.pool())?;
        let insertable: DbNewUser = new_user.into();
        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::models::user::{UpdateUser as DbUpdateUser, User as DbUser};
        use crate::schema::users;

        let mut conn = get_connection(self.pool())?;
        let db_updates: DbUpdateUser = updates.into();

        let updated = diesel::update(users::table.find(user_id))
            .set(&db_updates)
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }

    fn update_user_password(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = get_connection(self.pool())?;
        diesel::update(users::table.find(user_id))
            .set((
                users::password.eq(password_hash),
                users::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = get_connection(self.pool())?;
        diesel::delete(users::table.find(user_id)).execute(&mut conn)?;

        Ok(())
    }
}
