use std::collections::HashMap;

use chrono::NaiveDate;

use himatika_events::domain::event::{NewEvent, UpdateEvent};
use himatika_events::domain::user::{NewUser, UpdateUser, UserRole};
use himatika_events::listing::{PageRequest, SortSpec, build_filters};
use himatika_events::repository::event::{EVENT_FILTERS, EVENT_SORT_FIELDS};
use himatika_events::repository::user::{USER_FILTERS, USER_SORT_FIELDS};
use himatika_events::repository::{
    DieselRepository, EventReader, EventWriter, ListQuery, UserReader, UserWriter,
};

mod common;

fn event_query(params: &HashMap<String, String>, per_page: usize) -> ListQuery {
    let page = params.get("page").and_then(|p| p.parse().ok());
    ListQuery {
        clause: build_filters(EVENT_FILTERS, params),
        sort: SortSpec::resolve(
            params.get("sort_field").map(String::as_str),
            params.get("sort_order").map(String::as_str),
            EVENT_SORT_FIELDS,
            "id",
        ),
        page: PageRequest::new(page, per_page),
    }
}

fn user_query(params: &HashMap<String, String>, per_page: usize) -> ListQuery {
    let page = params.get("page").and_then(|p| p.parse().ok());
    ListQuery {
        clause: build_filters(USER_FILTERS, params),
        sort: SortSpec::resolve(
            params.get("sort_field").map(String::as_str),
            params.get("sort_order").map(String::as_str),
            USER_SORT_FIELDS,
            "id",
        ),
        page: PageRequest::new(page, per_page),
    }
}

fn seed_admin(repo: &DieselRepository) -> i32 {
    let admin = NewUser::new(
        "admin@himatika.org".to_string(),
        "Admin".to_string(),
        "hash".to_string(),
        UserRole::Admin,
    );
    repo.create_user(&admin).unwrap().id
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_user_repository_crud() {
    let test_db = common::TestDb::new("test_user_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let new_user = NewUser::new(
        "  Ani@Himatika.org ".to_string(),
        " Ani ".to_string(),
        "hash".to_string(),
        UserRole::Admin,
    );
    let created = repo.create_user(&new_user).unwrap();
    assert_eq!(created.email, "ani@himatika.org");
    assert_eq!(created.username, "ani@himatika.org");
    assert_eq!(created.name, "Ani");
    assert!(created.is_actived);
    assert!(created.is_verified_email);
    assert_eq!(created.role, UserRole::Admin);

    let found = repo.get_user_by_username("ani@himatika.org").unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(repo.get_user_by_username("nobody").unwrap().is_none());

    let updated = repo
        .update_user(
            created.id,
            &UpdateUser {
                name: "Ani Wijaya".to_string(),
                is_actived: false,
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Ani Wijaya");
    assert!(!updated.is_actived);

    repo.update_user_password(created.id, "newhash").unwrap();
    let reloaded = repo.get_user_by_id(created.id).unwrap().unwrap();
    assert_eq!(reloaded.password, "newhash");

    repo.delete_user(created.id).unwrap();
    assert!(repo.get_user_by_id(created.id).unwrap().is_none());
}

#[test]
fn test_user_listing_filters() {
    let test_db = common::TestDb::new("test_user_listing_filters.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    for i in 0..4 {
        let role = if i % 2 == 0 {
            UserRole::Admin
        } else {
            UserRole::Member
        };
        let user = NewUser::new(
            format!("user{i}@himatika.org"),
            format!("User {i}"),
            "hash".to_string(),
            role,
        );
        repo.create_user(&user).unwrap();
    }

    let all = repo.list_users(&user_query(&params(&[]), 10)).unwrap();
    assert_eq!(all.total, 4);
    assert_eq!(all.rows.len(), 4);

    let admins = repo
        .list_users(&user_query(&params(&[("role", "A")]), 10))
        .unwrap();
    assert_eq!(admins.total, 2);
    assert!(admins.rows.iter().all(|u| u.role == UserRole::Admin));

    // The sentinel value disables the filter instead of matching nothing.
    let sentinel = repo
        .list_users(&user_query(&params(&[("role", "all")]), 10))
        .unwrap();
    assert_eq!(sentinel.total, 4);

    let searched = repo
        .list_users(&user_query(&params(&[("search", "user2")]), 10))
        .unwrap();
    assert_eq!(searched.total, 1);
    assert_eq!(searched.rows[0].email, "user2@himatika.org");
}

#[test]
fn test_event_repository_crud() {
    let test_db = common::TestDb::new("test_event_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let admin_id = seed_admin(&repo);

    let date = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let new_event = NewEvent::new(
        "Seminar Nasional".to_string(),
        "<p>Halo</p><script>alert(1)</script>".to_string(),
        date,
        "Budi".to_string(),
        100,
        admin_id,
    );
    let created = repo.create_event(&new_event).unwrap();
    assert_eq!(created.title, "Seminar Nasional");
    assert!(!created.description.contains("script"));
    assert!(!created.is_done);

    let found = repo.get_event_by_public_id(&created.public_id).unwrap();
    assert_eq!(found.map(|e| e.id), Some(created.id));

    let updates = UpdateEvent::new(
        "Seminar Daerah".to_string(),
        "Deskripsi baru".to_string(),
        date,
        "Citra".to_string(),
        50,
        admin_id,
    );
    let updated = repo.update_event(&created.public_id, &updates).unwrap();
    assert_eq!(updated.title, "Seminar Daerah");
    assert_eq!(updated.speaker, "Citra");
    assert_eq!(updated.number_of_participant, 50);

    repo.delete_event(&created.public_id).unwrap();
    assert!(
        repo.get_event_by_public_id(&created.public_id)
            .unwrap()
            .is_none()
    );
    // Deleting an already-removed event is a no-op.
    assert!(repo.delete_event(&created.public_id).is_ok());
}

#[test]
fn test_event_listing_pagination_and_filters() {
    let test_db = common::TestDb::new("test_event_listing_pagination.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let admin_id = seed_admin(&repo);

    let date = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    for i in 0..25 {
        let new_event = NewEvent::new(
            format!("Event {i:02}"),
            String::new(),
            date,
            "Budi".to_string(),
            i,
            admin_id,
        );
        repo.create_event(&new_event).unwrap();
    }

    let first = repo.list_events(&event_query(&params(&[]), 10)).unwrap();
    assert_eq!(first.total, 25);
    assert_eq!(first.last_page, 3);
    assert_eq!(first.rows.len(), 10);
    assert_eq!(first.rows[0].title, "Event 00");

    let third = repo
        .list_events(&event_query(&params(&[("page", "3")]), 10))
        .unwrap();
    assert_eq!(third.rows.len(), 5);

    // A page past the end still reports the real totals.
    let beyond = repo
        .list_events(&event_query(&params(&[("page", "99")]), 10))
        .unwrap();
    assert_eq!(beyond.total, 25);
    assert_eq!(beyond.rows.len(), 0);

    let searched = repo
        .list_events(&event_query(&params(&[("search", "event 07")]), 10))
        .unwrap();
    assert_eq!(searched.total, 1);
    assert_eq!(searched.rows[0].title, "Event 07");

    let not_done = repo
        .list_events(&event_query(&params(&[("is_done", "0")]), 10))
        .unwrap();
    assert_eq!(not_done.total, 25);
    let done = repo
        .list_events(&event_query(&params(&[("is_done", "1")]), 10))
        .unwrap();
    assert_eq!(done.total, 0);

    let desc = repo
        .list_events(&event_query(
            &params(&[("sort_field", "title"), ("sort_order", "desc")]),
            10,
        ))
        .unwrap();
    assert_eq!(desc.rows[0].title, "Event 24");
}

#[test]
fn test_event_listing_is_repeatable_on_an_unchanged_store() {
    let test_db = common::TestDb::new("test_event_listing_repeatable.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let admin_id = seed_admin(&repo);

    let date = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    for i in 0..15 {
        let new_event = NewEvent::new(
            format!("Event {i:02}"),
            String::new(),
            date,
            "Budi".to_string(),
            i,
            admin_id,
        );
        repo.create_event(&new_event).unwrap();
    }

    let query_params = params(&[
        ("search", "event"),
        ("sort_field", "title"),
        ("sort_order", "desc"),
        ("page", "2"),
    ]);
    let first = repo.list_events(&event_query(&query_params, 10)).unwrap();
    let second = repo.list_events(&event_query(&query_params, 10)).unwrap();

    assert_eq!(first.total, second.total);
    assert_eq!(first.page, second.page);
    assert_eq!(first.last_page, second.last_page);
    assert_eq!(first.rows, second.rows);
}
