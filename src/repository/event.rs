use std::cell::RefCell;

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::db::get_connection;
use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::PublicId;
use crate::listing::{
    self, CountRow, FilterField, ListPage, RowStore, SortSpec, WhereClause, fetch_page,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, EventReader, EventWriter, ListQuery};

/// Recognized query parameters of the events listing.
pub const EVENT_FILTERS: &[FilterField] = &[
    FilterField::like("search", &["title", "description", "speaker"]),
    FilterField::flag("is_done", "is_done"),
    FilterField::flag("has_send_certificate", "has_send_certificate"),
];

/// Columns the events listing may be sorted by; the first is the default.
pub const EVENT_SORT_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "date",
    "speaker",
    "is_done",
    "has_send_certificate",
];

const EVENT_COLUMNS: &str = "id, public_id, title, description, date, speaker, \
     number_of_participant, is_done, has_send_certificate, created_by, updated_by, \
     created_at, updated_at";

/// Runs both listing queries of one request on a single pooled connection.
struct EventRows<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl RowStore for EventRows<'_> {
    type Row = crate::models::event::Event;

    fn count(&self, clause: &WhereClause) -> RepositoryResult<i64> {
        let mut conn = self.conn.borrow_mut();
        let query = diesel::sql_query(listing::count_sql("events", clause)).into_boxed();
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
        let query =
            diesel::sql_query(listing::select_sql(EVENT_COLUMNS, "events", clause, sort))
                .into_boxed();
        let rows = listing::bind_clause(query, clause)
            .bind::<BigInt, _>(limit)
            .bind::<BigInt, _>(offset)
            .load(&mut **conn)?;
        Ok(rows)
    }
}

impl EventReader for DieselRepository {
    fn get_event_by_public_id(&self, public_id: &PublicId) -> RepositoryResult<Option<Event>> {
        use crate::models::event::Event as DbEvent;
        use crate::schema::events;

        let mut conn = get_connection(self.pool())?;
        let event = events::table
            .filter(events::public_id.eq(public_id.as_bytes().as_slice()))
            .first::<DbEvent>(&mut conn)
            .optional()?;

        Ok(event.map(Into::into))
    }

    fn list_events(&self, query: &ListQuery) -> RepositoryResult<ListPage<Event>> {
        let mut conn = get_connection(self.pool())?;
        let store = EventRows {
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

impl EventWriter for DieselRepository {
    fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event> {
        use crate::models::event::{Event as DbEvent, NewEvent as DbNewEvent};
        use crate::schema::events;

        let mut conn = get_connection(self.pool())?;
        let insertable: DbNewEvent = new_event.into();
        let created = diesel::insert_into(events::table)
            .values(&insertable)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(created.into())
    }

    fn update_event(
        &self,
        public_id: &PublicId,
        updates: &UpdateEvent,
    ) -> RepositoryResult<Event> {
        use crate::models::event::{Event as DbEvent, UpdateEvent as DbUpdateEvent};
        use crate::schema::events;

        let mut conn = get_connection(self.pool())?;
        let db_updates: DbUpdateEvent = updates.into();

        let updated = diesel::update(
            events::table.filter(events::public_id.eq(public_id.as_bytes().as_slice())),
        )
        .set(&db_updates)
        .get_result::<DbEvent>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_event(&self, public_id: &PublicId) -> RepositoryResult<()> {
        use crate::schema::events;

        let mut conn = get_connection(self.pool())?;
        diesel::delete(
            events::table.filter(events::public_id.eq(public_id.as_bytes().as_slice())),
        )
        .execute(&mut conn)?;

        Ok(())
    }
}
