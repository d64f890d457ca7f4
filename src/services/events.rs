//! Services handling event administration workflows.

use std::collections::HashMap;

use validator::Validate;

use crate::DEFAULT_PAGE_SIZE;
use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::PublicId;
use crate::dto::events::{CompletedEventsData, EventsPageData};
use crate::forms::events::{
    AddEventForm, DeleteEventForm, EditEventForm, EventListParams, parse_event_datetime,
};
use crate::listing::{PageRequest, SortSpec, build_filters};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::event::{EVENT_FILTERS, EVENT_SORT_FIELDS};
use crate::repository::{EventReader, EventWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Loads one page of events honoring the request's filters and sort.
pub fn list_events<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &EventListParams,
) -> ServiceResult<EventsPageData>
where
    R: EventReader + ?Sized,
{
    ensure_admin(user)?;

    let clause = build_filters(EVENT_FILTERS, params);
    let sort = SortSpec::resolve(
        params.sort_field.as_deref(),
        params.sort_order.as_deref(),
        EVENT_SORT_FIELDS,
        "id",
    );
    let page = PageRequest::new(params.page, DEFAULT_PAGE_SIZE);

    let active_filters = clause
        .active()
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    let list = repo.list_events(&ListQuery { clause, sort, page })?;

    Ok(EventsPageData {
        events: Paginated::new(list.rows, list.page, list.last_page, list.total),
        sort,
        active_filters,
    })
}

/// Completed events for the public page, newest first.
pub fn list_completed_events<R>(repo: &R, page: Option<usize>) -> ServiceResult<CompletedEventsData>
where
    R: EventReader + ?Sized,
{
    let params: HashMap<String, String> =
        HashMap::from([("is_done".to_string(), "1".to_string())]);
    let clause = build_filters(EVENT_FILTERS, &params);
    let sort = SortSpec::resolve(Some("date"), Some("desc"), EVENT_SORT_FIELDS, "id");

    let list = repo.list_events(&ListQuery {
        clause,
        sort,
        page: PageRequest::new(page, DEFAULT_PAGE_SIZE),
    })?;

    Ok(CompletedEventsData {
        events: Paginated::new(list.rows, list.page, list.last_page, list.total),
    })
}

/// Loads one event for the edit page.
pub fn get_event<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Event>
where
    R: EventReader + ?Sized,
{
    ensure_admin(user)?;

    let public_id: PublicId = id
        .parse()
        .map_err(|_| ServiceError::Form("Invalid ID event".to_string()))?;

    repo.get_event_by_public_id(&public_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the form and persists a new event.
pub fn add_event<R>(repo: &R, user: &AuthenticatedUser, form: AddEventForm) -> ServiceResult<()>
where
    R: EventWriter + ?Sized,
{
    ensure_admin(user)?;
    form.validate()?;

    let date = parse_event_datetime(&form.date, &form.time)
        .ok_or_else(|| ServiceError::Form("Please supply valid date".to_string()))?;
    let participants: i32 = form
        .number_of_participant
        .trim()
        .parse()
        .map_err(|_| ServiceError::Form("Number of participant must be numeric".to_string()))?;
    let created_by = user.user_id().ok_or(ServiceError::Unauthorized)?;

    let new_event = NewEvent::new(
        form.title,
        form.description,
        date,
        form.speaker,
        participants,
        created_by,
    );
    repo.create_event(&new_event)?;

    Ok(())
}

/// Validates the form and applies the updates to an existing event.
pub fn update_event<R>(repo: &R, user: &AuthenticatedUser, form: EditEventForm) -> ServiceResult<()>
where
    R: EventWriter + ?Sized,
{
    ensure_admin(user)?;
    form.validate()?;

    let public_id: PublicId = form
        .id
        .parse()
        .map_err(|_| ServiceError::Form("Invalid ID event".to_string()))?;
    let date = parse_event_datetime(&form.date, &form.time)
        .ok_or_else(|| ServiceError::Form("Please supply valid date".to_string()))?;
    let participants: i32 = form
        .number_of_participant
        .trim()
        .parse()
        .map_err(|_| ServiceError::Form("Number of participant must be numeric".to_string()))?;
    let updated_by = user.user_id().ok_or(ServiceError::Unauthorized)?;

    let updates = UpdateEvent::new(
        form.title,
        form.description,
        date,
        form.speaker,
        participants,
        updated_by,
    );
    repo.update_event(&public_id, &updates).map_err(|e| match e {
        RepositoryError::NotFound => ServiceError::NotFound,
        e => e.into(),
    })?;

    Ok(())
}

/// Removes an event addressed by its public id.
pub fn delete_event<R>(repo: &R, user: &AuthenticatedUser, form: &DeleteEventForm) -> ServiceResult<()>
where
    R: EventWriter + ?Sized,
{
    ensure_admin(user)?;

    let public_id: PublicId = form
        .id
        .parse()
        .map_err(|_| ServiceError::Form("Invalid ID event".to_string()))?;
    repo.delete_event(&public_id)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::UserRole;
    use crate::listing::ListPage;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@himatika.org".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            exp: 0,
        }
    }

    fn member() -> AuthenticatedUser {
        AuthenticatedUser {
            role: UserRole::Member,
            ..admin()
        }
    }

    fn sample_event(id: i32) -> Event {
        let now = Utc::now().naive_utc();
        Event {
            id,
            public_id: PublicId::new(),
            title: format!("Event {id}"),
            description: String::new(),
            date: now,
            speaker: "Jane".to_string(),
            number_of_participant: 30,
            is_done: false,
            has_send_certificate: false,
            created_by: 1,
            updated_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn list_events_requires_the_admin_role() {
        let repo = MockRepository::new();
        let err = list_events(&repo, &member(), &EventListParams::default()).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn list_events_forwards_resolved_filters_and_sort() {
        let mut repo = MockRepository::new();
        repo.expect_list_events()
            .withf(|query| {
                query.clause.sql() == " WHERE is_done = ?"
                    && query.sort.field == "date"
                    && query.page.page == 2
            })
            .return_once(|_| {
                Ok(ListPage {
                    rows: vec![sample_event(1)],
                    total: 11,
                    page: 2,
                    last_page: 2,
                })
            });

        let params = EventListParams {
            page: Some(2),
            is_done: Some("1".to_string()),
            sort_field: Some("date".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let data = list_events(&repo, &admin(), &params).unwrap();
        assert_eq!(data.events.items.len(), 1);
        assert_eq!(data.events.page, 2);
        assert_eq!(
            data.active_filters,
            vec![("is_done".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn add_event_rejects_invalid_dates_before_touching_the_store() {
        let repo = MockRepository::new();
        let form = AddEventForm {
            token: "t".to_string(),
            title: "Seminar".to_string(),
            description: String::new(),
            date: "2026-13-40".to_string(),
            time: "10:00".to_string(),
            speaker: "Jane".to_string(),
            number_of_participant: "30".to_string(),
        };
        let err = add_event(&repo, &admin(), form).unwrap_err();
        assert!(matches!(err, ServiceError::Form(m) if m == "Please supply valid date"));
    }

    #[test]
    fn add_event_persists_a_sanitized_event() {
        let mut repo = MockRepository::new();
        repo.expect_create_event()
            .withf(|event| event.title == "Seminar" && event.number_of_participant == 30)
            .return_once(|event| {
                let mut created = sample_event(1);
                created.title = event.title.clone();
                Ok(created)
            });

        let form = AddEventForm {
            token: "t".to_string(),
            title: " Seminar ".to_string(),
            description: String::new(),
            date: "2026-09-01".to_string(),
            time: "10:00".to_string(),
            speaker: "Jane".to_string(),
            number_of_participant: "30".to_string(),
        };
        add_event(&repo, &admin(), form).unwrap();
    }

    #[test]
    fn delete_event_rejects_malformed_ids() {
        let repo = MockRepository::new();
        let form = DeleteEventForm {
            token: "t".to_string(),
            id: "not-a-uuid".to_string(),
        };
        let err = delete_event(&repo, &admin(), &form).unwrap_err();
        assert!(matches!(err, ServiceError::Form(m) if m == "Invalid ID event"));
    }
}
