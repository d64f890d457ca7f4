use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::forms::auth::{ChangePasswordForm, LoginForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    alert_level_to_str, base_context, issue_form_token, redirect, render_template, take_form_token,
};
use crate::services::ServiceError;
use crate::services::auth as auth_service;

#[get("/login")]
pub async fn login_page(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let alerts = flash_messages
        .iter()
        .map(|m| (m.content(), alert_level_to_str(&m.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("token", &issue_form_token(&session, "login"));

    render_template(&tera, "login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    session: Session,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    if !take_form_token(&session, "login", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/login");
    }

    let user = match auth_service::login(repo.get_ref(), &form) {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/login");
        }
        Err(e) => {
            log::error!("Failed to log in: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let claims = AuthenticatedUser::from_user(&user);
    let jwt = match claims.to_jwt(&server_config.secret) {
        Ok(jwt) => jwt,
        Err(e) => {
            log::error!("Failed to sign session token: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = Identity::login(&req.extensions(), jwt) {
        log::error!("Failed to establish session: {e}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/")
}

#[get("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/login")
}

#[get("/change_password")]
pub async fn change_password_page(
    session: Session,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "change_password");
    context.insert("token", &issue_form_token(&session, "change_password"));

    render_template(&tera, "change_password.html", &context)
}

#[post("/change_password")]
pub async fn change_password(
    session: Session,
    identity: Identity,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ChangePasswordForm>,
) -> impl Responder {
    if !take_form_token(&session, "change_password", &form.token) {
        FlashMessage::error("Invalid Token").send();
        return redirect("/change_password");
    }

    let user_id = match user.user_id() {
        Some(id) => id,
        None => return redirect("/login"),
    };

    match auth_service::change_password(repo.get_ref(), user_id, &form) {
        Ok(()) => {
            // Changing the password invalidates the current session.
            identity.logout();
            FlashMessage::success("Password berhasil diubah. Silahkan login kembali.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/change_password")
        }
        Err(e) => {
            log::error!("Failed to change password: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
