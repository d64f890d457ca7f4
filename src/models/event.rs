use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::event::{
    Event as DomainEvent, NewEvent as DomainNewEvent, UpdateEvent as DomainUpdateEvent,
};
use crate::domain::types::PublicId;

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = crate::schema::events)]
/// Diesel model for [`crate::domain::event::Event`]. Also loaded by name
/// from the raw listing queries, hence `QueryableByName`.
pub struct Event {
    pub id: i32,
    pub public_id: Vec<u8>,
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub speaker: String,
    pub number_of_participant: i32,
    pub is_done: bool,
    pub has_send_certificate: bool,
    pub created_by: i32,
    pub updated_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
/// Insertable form of [`Event`].
pub struct NewEvent<'a> {
    pub public_id: &'a [u8],
    pub title: &'a str,
    pub description: &'a str,
    pub date: NaiveDateTime,
    pub speaker: &'a str,
    pub number_of_participant: i32,
    pub created_by: i32,
    pub updated_by: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
/// Data used when updating an [`Event`] record.
pub struct UpdateEvent<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: NaiveDateTime,
    pub speaker: &'a str,
    pub number_of_participant: i32,
    pub updated_by: i32,
    pub updated_at: NaiveDateTime,
}

impl From<Event> for DomainEvent {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            // A malformed blob can only come from manual DB edits; fall back
            // to the nil-free random id rather than aborting the listing.
            public_id: PublicId::from_bytes(&event.public_id).unwrap_or_default(),
            title: event.title,
            description: event.description,
            date: event.date,
            speaker: event.speaker,
            number_of_participant: event.number_of_participant,
            is_done: event.is_done,
            has_send_certificate: event.has_send_certificate,
            created_by: event.created_by,
            updated_by: event.updated_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewEvent> for NewEvent<'a> {
    fn from(event: &'a DomainNewEvent) -> Self {
        Self {
            public_id: event.public_id.as_bytes(),
            title: &event.title,
            description: &event.description,
            date: event.date,
            speaker: &event.speaker,
            number_of_participant: event.number_of_participant,
            created_by: event.created_by,
            updated_by: event.created_by,
        }
    }
}

impl<'a> From<&'a DomainUpdateEvent> for UpdateEvent<'a> {
    fn from(event: &'a DomainUpdateEvent) -> Self {
        Self {
            title: &event.title,
            description: &event.description,
            date: event.date,
            speaker: &event.speaker,
            number_of_participant: event.number_of_participant,
            updated_by: event.updated_by,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
