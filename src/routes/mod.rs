use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::{Deserialize, Deserializer, Serialize};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;

pub mod api;
pub mod categories;
pub mod items;
pub mod main;
pub mod menu;
pub mod restaurants;

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Render a tera template, logging and returning a 500 on failure.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flash message shaped for the templates.
#[derive(Debug, Serialize)]
pub struct Alert {
    pub level: &'static str,
    pub message: String,
}

/// Collect incoming flash messages into template alerts.
pub fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<Alert> {
    flash_messages
        .iter()
        .map(|message| Alert {
            level: level_class(message.level()),
            message: message.content().to_string(),
        })
        .collect()
}

/// Base template context shared by every dashboard page.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    active_page: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(flash_messages));
    context.insert("user", user);
    context.insert("active_page", active_page);
    context
}

/// Deserialize an optional string field, turning blank input into `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Success => "success",
        Level::Warning => "warning",
        Level::Error => "danger",
        _ => "info",
    }
}
