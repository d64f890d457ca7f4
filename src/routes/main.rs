use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{alert_level_to_str, base_context, render_template};
use crate::services::events as event_service;

#[get("/")]
pub async fn index(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "index");
    render_template(&tera, "index.html", &context)
}

#[derive(Deserialize)]
pub struct CompletedParams {
    pub page: Option<usize>,
}

/// Public archive of finished events, newest first. No login required.
#[get("/completed")]
pub async fn completed(
    repo: web::Data<DieselRepository>,
    params: web::Query<CompletedParams>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match event_service::list_completed_events(repo.get_ref(), params.page) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Failed to list completed events: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let alerts = flash_messages
        .iter()
        .map(|m| (m.content(), alert_level_to_str(&m.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("events", &data.events);

    render_template(&tera, "completed.html", &context)
}
