use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::repository::FallbackRepository;
use crate::routes::{base_context, collect_alerts, redirect, render_template};
use crate::services::main::IndexQuery;
use crate::services::{ServiceError, main as main_service};

/// Payload of the sign-in form. There is no password step: the service
/// trusts the identity cookie it issues, the way the dashboard trusts an
/// upstream auth proxy in production.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_index_page(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "index");
            context.insert("restaurants", &data.restaurants);
            context.insert("search", &data.search);
            context.insert("demo_mode", &repo.is_demo());
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list restaurants: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/signin")]
pub async fn show_signin(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(&flash_messages));
    render_template(&tera, "main/signin.html", &context)
}

#[post("/signin")]
pub async fn process_signin(req: HttpRequest, form: web::Form<SignInForm>) -> impl Responder {
    let form = form.into_inner();

    let email = form.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        FlashMessage::error("Please enter a valid email address.").send();
        return redirect("/signin");
    }

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| email.split('@').collect::<Vec<_>>()[0].to_string());

    let user = AuthenticatedUser::new(email.clone(), email, name);

    let id = match serde_json::to_string(&user) {
        Ok(id) => id,
        Err(err) => {
            log::error!("Failed to serialize identity: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match Identity::login(&req.extensions(), id) {
        Ok(_) => redirect("/"),
        Err(err) => {
            log::error!("Failed to create session: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/signin")
}

/// Shared mapping from service errors to dashboard responses.
pub(crate) fn dashboard_error(err: ServiceError, context: &str, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect("/signin"),
        ServiceError::Forbidden => {
            FlashMessage::error("You do not own this restaurant.").send();
            redirect("/")
        }
        ServiceError::NotFound => {
            FlashMessage::error("Not found, or already deleted.").send();
            redirect(back)
        }
        ServiceError::Conflict => {
            FlashMessage::error("A restaurant with this slug already exists.").send();
            redirect(back)
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        err => {
            log::error!("{context}: {err}");
            FlashMessage::error("Something went wrong, please try again.").send();
            redirect(back)
        }
    }
}
