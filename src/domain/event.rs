use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::PublicId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i32,
    pub public_id: PublicId,
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

#[derive(Clone, Debug)]
pub struct NewEvent {
    pub public_id: PublicId,
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub speaker: String,
    pub number_of_participant: i32,
    pub created_by: i32,
}

impl NewEvent {
    /// Trims the display fields and sanitizes the free-form description
    /// (it is rendered back into HTML).
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        date: NaiveDateTime,
        speaker: String,
        number_of_participant: i32,
        created_by: i32,
    ) -> Self {
        Self {
            public_id: PublicId::new(),
            title: title.trim().to_string(),
            description: ammonia::clean(description.trim()),
            date,
            speaker: speaker.trim().to_string(),
            number_of_participant,
            created_by,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub speaker: String,
    pub number_of_participant: i32,
    pub updated_by: i32,
}

impl UpdateEvent {
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        date: NaiveDateTime,
        speaker: String,
        number_of_participant: i32,
        updated_by: i32,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            description: ammonia::clean(description.trim()),
            date,
            speaker: speaker.trim().to_string(),
            number_of_participant,
            updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_sanitizes_description_markup() {
        let event = NewEvent::new(
            " Rust Workshop ".to_string(),
            "<b>intro</b><script>alert(1)</script>".to_string(),
            chrono::NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            "Jane Doe".to_string(),
            50,
            1,
        );
        assert_eq!(event.title, "Rust Workshop");
        assert_eq!(event.description, "<b>intro</b>");
    }
}
