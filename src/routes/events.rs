use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::events::{AddEventForm, DeleteEventForm, EditEventForm, EventListParams};
use crate::repository::event::EVENT_SORT_FIELDS;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, issue_form_token, listing_query_string, redirect, render_template,
    sort_query_string, take_form_token,
};
use crate::services::ServiceError;
use crate::services::events as event_service;

#[get("/events")]
pub async fn show_events(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<EventListParams>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match event_service::list_events(repo.get_ref(), &user, &params) {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Anda tidak memiliki akses").send();
            return redirect("/");
        }
        Err(e) => {
            log::error!("Failed to list events: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let sort_links = EVENT_SORT_FIELDS
        .iter()
        .map(|key| (*key, sort_query_string(key, &data.sort, &data.active_filters)))
        .collect::<std::collections::HashMap<_, _>>();

    let mut context = base_context(&flash_messages, &user, "events");
    context.insert("events", &data.events);
    context.insert("sort", &data.sort);
    context.insert("sort_links", &sort_links);
    context.insert("params", &params.into_inner());
    context.insert(
        "listing_query",
        &listing_query_string(&data.sort, &data.active_filters),
    );
    context.insert("token", &issue_form_token(&session, "delete_event"));

    render_template(&tera, "events/index.html", &context)
}

#[get("/events/add")]
pub async fn add_event_page(
    session: Session,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if !user.is_admin() {
        return redirect("/");
    }

    let mut context = base_context(&flash_messages, &user, "events");
    context.insert("token", &issue_form_token(&session, "add_event"));

    render_template(&tera, "events/add.html", &context)
}

#[post("/events/add")]
pub async fn add_event(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddEventForm>,
) -> impl Responder {
    if !take_form_token(&session, "add_event", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/events/add");
    }

    match event_service::add_event(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Event berhasil ditambahkan").send();
            redirect("/events")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/events/add")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(e) => {
            log::error!("Failed to add event: {e}");
            FlashMessage::error("event gagal ditambahkan").send();
            redirect("/events/add")
        }
    }
}

#[get("/events/edit/{public_id}")]
pub async fn edit_event_page(
    public_id: web::Path<String>,
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let event = match event_service::get_event(repo.get_ref(), &user, &public_id) {
        Ok(event) => event,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Invalid ID event").send();
            return redirect("/events");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/events");
        }
        Err(ServiceError::Unauthorized) => return redirect("/"),
        Err(e) => {
            log::error!("Failed to get event: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "events");
    context.insert("event", &event);
    context.insert("token", &issue_form_token(&session, "edit_event"));

    render_template(&tera, "events/edit.html", &context)
}

#[post("/events/edit")]
pub async fn edit_event(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditEventForm>,
) -> impl Responder {
    if !take_form_token(&session, "edit_event", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/events");
    }

    let back = format!("/events/edit/{}", form.id);

    match event_service::update_event(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Event berhasil diupdate").send();
            redirect("/events")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Invalid ID event").send();
            redirect("/events")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(e) => {
            log::error!("Failed to update event: {e}");
            FlashMessage::error("Event gagal diupdate").send();
            redirect(&back)
        }
    }
}

#[post("/events/delete")]
pub async fn delete_event(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteEventForm>,
) -> impl Responder {
    if !take_form_token(&session, "delete_event", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/events");
    }

    match event_service::delete_event(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Event berhasil dihapus").send();
            redirect("/events")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/events")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(e) => {
            log::error!("Failed to delete event: {e}");
            FlashMessage::error("Event gagal dihapus").send();
            redirect("/events")
        }
    }
}
