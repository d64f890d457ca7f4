use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::{validate_numeric, validate_title, validate_person_name};
use crate::listing::ParamSource;

/// Combines the separate date and time inputs into one datetime. The time
/// input arrives as `HH:MM` from the browser but `HH:MM:SS` is accepted too.
pub fn parse_event_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let time = match time.len() {
        5 => format!("{time}:00"),
        _ => time.to_string(),
    };
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").ok()
}

#[derive(Deserialize, Validate)]
/// Form data for creating an event.
pub struct AddEventForm {
    pub token: String,
    #[validate(length(min = 1, message = "Title can not be empty"))]
    #[validate(custom(function = validate_title))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Date can not be empty"))]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[validate(length(min = 1, message = "Speaker can not be empty"))]
    #[validate(custom(function = validate_person_name))]
    pub speaker: String,
    #[validate(length(min = 1, message = "Number of Participant can not be empty"))]
    #[validate(custom(function = validate_numeric))]
    pub number_of_participant: String,
}

#[derive(Deserialize, Validate)]
/// Form data for updating an event, addressed by its public id.
pub struct EditEventForm {
    pub token: String,
    pub id: String,
    #[validate(length(min = 1, message = "Title can not be empty"))]
    #[validate(custom(function = validate_title))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Date can not be empty"))]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[validate(length(min = 1, message = "Speaker can not be empty"))]
    #[validate(custom(function = validate_person_name))]
    pub speaker: String,
    #[validate(length(min = 1, message = "Number of Participant can not be empty"))]
    #[validate(custom(function = validate_numeric))]
    pub number_of_participant: String,
}

#[derive(Deserialize)]
/// Delete confirmation posted from the listing page.
pub struct DeleteEventForm {
    pub token: String,
    pub id: String,
}

#[derive(Deserialize, Serialize, Default)]
/// Raw query parameters of the events listing. Invalid values are dropped
/// later by the listing engine, never rejected.
pub struct EventListParams {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub is_done: Option<String>,
    pub has_send_certificate: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ParamSource for EventListParams {
    fn param(&self, name: &str) -> Option<&str> {
        match name {
            "search" => self.search.as_deref(),
            "is_done" => self.is_done.as_deref(),
            "has_send_certificate" => self.has_send_certificate.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_accepts_short_and_full_time() {
        assert!(parse_event_datetime("2026-09-01", "10:30").is_some());
        assert!(parse_event_datetime("2026-09-01", "10:30:15").is_some());
        assert!(parse_event_datetime("2026-09-01", "").is_none());
        assert!(parse_event_datetime("01-09-2026", "10:30").is_none());
    }

    #[test]
    fn add_form_flags_invalid_title() {
        let form = AddEventForm {
            token: "t".to_string(),
            title: "Seminar 2024".to_string(),
            description: String::new(),
            date: "2026-09-01".to_string(),
            time: "10:00".to_string(),
            speaker: "Jane".to_string(),
            number_of_participant: "40".to_string(),
        };
        assert!(form.validate().is_err());
    }
}
