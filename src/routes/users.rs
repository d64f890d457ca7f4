use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::users::{AddUserForm, DeleteUserForm, EditUserForm, UserListParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::repository::user::USER_SORT_FIELDS;
use crate::routes::{
    base_context, issue_form_token, listing_query_string, redirect, render_template,
    sort_query_string, take_form_token,
};
use crate::services::ServiceError;
use crate::services::email::EmailService;
use crate::services::users as user_service;

#[get("/users")]
pub async fn show_users(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<UserListParams>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match user_service::list_users(repo.get_ref(), &user, &params) {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Anda tidak memiliki akses").send();
            return redirect("/");
        }
        Err(e) => {
            log::error!("Failed to list users: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let sort_links = USER_SORT_FIELDS
        .iter()
        .map(|key| (*key, sort_query_string(key, &data.sort, &data.active_filters)))
        .collect::<std::collections::HashMap<_, _>>();

    let mut context = base_context(&flash_messages, &user, "users");
    context.insert("users", &data.users);
    context.insert("sort", &data.sort);
    context.insert("sort_links", &sort_links);
    context.insert("params", &params.into_inner());
    context.insert(
        "listing_query",
        &listing_query_string(&data.sort, &data.active_filters),
    );
    context.insert("token", &issue_form_token(&session, "delete_user"));

    render_template(&tera, "users/index.html", &context)
}

#[get("/users/add")]
pub async fn add_user_page(
    session: Session,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if !user.is_admin() {
        return redirect("/");
    }

    let mut context = base_context(&flash_messages, &user, "users");
    context.insert("token", &issue_form_token(&session, "add_user"));

    render_template(&tera, "users/add.html", &context)
}

#[post("/users/add")]
pub async fn add_user(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    emailer: web::Data<EmailService>,
    web::Form(form): web::Form<AddUserForm>,
) -> impl Responder {
    if !take_form_token(&session, "add_user", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/users/add");
    }

    match user_service::add_user(repo.get_ref(), &user, form) {
        Ok((created, password)) => {
            // The account is usable even when the welcome mail bounces; the
            // admin can still hand over the password another way.
            if let Err(e) = emailer
                .send_onboarding(&created.email, &created.name, &created.username, &password)
                .await
            {
                log::error!("Failed to send onboarding email to {}: {e}", created.email);
            }
            FlashMessage::success("user admin berhasil ditambahkan").send();
            redirect("/users")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/users/add")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(e) => {
            log::error!("Failed to add user: {e}");
            FlashMessage::error("user admin gagal ditambahkan").send();
            redirect("/users/add")
        }
    }
}

#[get("/users/edit/{id}")]
pub async fn edit_user_page(
    id: web::Path<i32>,
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let account = match user_service::get_user(repo.get_ref(), &user, id.into_inner()) {
        Ok(account) => account,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Invalid ID user").send();
            return redirect("/users");
        }
        Err(ServiceError::Unauthorized) => return redirect("/"),
        Err(e) => {
            log::error!("Failed to get user: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "users");
    context.insert("account", &account);
    context.insert("token", &issue_form_token(&session, "edit_user"));

    render_template(&tera, "users/edit.html", &context)
}

#[post("/users/edit")]
pub async fn edit_user(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditUserForm>,
) -> impl Responder {
    if !take_form_token(&session, "edit_user", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/users");
    }

    let back = format!("/users/edit/{}", form.id);

    match user_service::update_user(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("User berhasil diupdate").send();
            redirect("/users")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(e) => {
            log::error!("Failed to update user: {e}");
            FlashMessage::error("User gagal diupdate").send();
            redirect(&back)
        }
    }
}

#[post("/users/delete")]
pub async fn delete_user(
    session: Session,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteUserForm>,
) -> impl Responder {
    if !take_form_token(&session, "delete_user", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/users");
    }

    match user_service::delete_user(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("user berhasil dihapus").send();
            redirect("/users")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(e) => {
            log::error!("Failed to delete user: {e}");
            FlashMessage::error("User gagal dihapus").send();
            redirect("/users")
        }
    }
}
