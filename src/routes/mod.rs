//! HTTP route handlers and shared handler helpers.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use rand::Rng;
use rand::distr::Alphanumeric;
use tera::{Context, Tera};

use crate::listing::{SortOrder, SortSpec};
use crate::models::auth::AuthenticatedUser;

pub mod auth;
pub mod events;
pub mod main;
pub mod users;

const FORM_TOKEN_LEN: usize = 32;

/// 303 redirect to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((LOCATION, location))
        .finish()
}

/// Render a tera template or answer 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            log::error!("Failed to render template {template}: {e}");
            HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Template context shared by every authenticated page: flash alerts, the
/// signed-in user and the active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|m| (m.content(), alert_level_to_str(&m.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context
}

/// Issue a one-time CSRF token for the named form and store it in the session.
pub fn issue_form_token(session: &Session, form_name: &str) -> String {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(FORM_TOKEN_LEN)
        .map(char::from)
        .collect();

    if let Err(e) = session.insert(format!("token_{form_name}"), token.clone()) {
        log::error!("Failed to store form token: {e}");
    }

    token
}

/// Consume the stored token for the named form and compare it with the
/// submitted one. Tokens are single use; a mismatch or a replay fails.
pub fn take_form_token(session: &Session, form_name: &str, supplied: &str) -> bool {
    match session.remove_as::<String>(&format!("token_{form_name}")) {
        Some(Ok(stored)) => !stored.is_empty() && stored == supplied,
        _ => false,
    }
}

/// Query string carrying the current sort and filters, used to keep them
/// across pagination links. Starts with `&` so it can follow `?page=N`.
pub fn listing_query_string(sort: &SortSpec, active_filters: &[(String, String)]) -> String {
    let mut query = format!(
        "&sort_field={}&sort_order={}",
        sort.field,
        sort.order.as_str()
    );
    for (name, value) in active_filters {
        query.push_str(&format!("&{name}={value}"));
    }
    query
}

/// Href for a column-header sort link. Clicking the active column toggles
/// the direction; any other column starts ascending.
pub fn sort_query_string(key: &str, sort: &SortSpec, active_filters: &[(String, String)]) -> String {
    let order = if key == sort.field {
        sort.order.toggled()
    } else {
        SortOrder::Asc
    };
    let mut query = format!("?sort_field={key}&sort_order={}", order.as_str());
    for (name, value) in active_filters {
        query.push_str(&format!("&{name}={value}"));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(field: &'static str, order: SortOrder) -> SortSpec {
        SortSpec { field, order }
    }

    #[test]
    fn listing_query_keeps_sort_and_filters() {
        let filters = vec![("search".to_string(), "korma".to_string())];
        assert_eq!(
            listing_query_string(&sort("date", SortOrder::Desc), &filters),
            "&sort_field=date&sort_order=desc&search=korma"
        );
    }

    #[test]
    fn sort_link_toggles_active_column() {
        let filters = vec![];
        assert_eq!(
            sort_query_string("date", &sort("date", SortOrder::Asc), &filters),
            "?sort_field=date&sort_order=desc"
        );
        assert_eq!(
            sort_query_string("date", &sort("date", SortOrder::Desc), &filters),
            "?sort_field=date&sort_order=asc"
        );
        assert_eq!(
            sort_query_string("title", &sort("date", SortOrder::Desc), &filters),
            "?sort_field=title&sort_order=asc"
        );
    }
}
