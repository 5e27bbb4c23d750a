use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::cart::Cart;
use crate::repository::FallbackRepository;
use crate::routes::{collect_alerts, redirect, render_template};
use crate::services::ServiceError;
use crate::services::cart::{CART_SESSION_KEY, add_item, place_order, set_quantity};
use crate::services::menu::get_menu_for_slug;

/// Query parameters accepted by the public menu page.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// Optional item search entered by the diner.
    pub search: Option<String>,
}

/// Body of the cart add/remove forms.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub item_id: i32,
}

/// Body of the cart quantity form.
#[derive(Debug, Deserialize)]
pub struct CartQuantityForm {
    pub item_id: i32,
    pub quantity: i64,
}

#[get("/menu/{slug}")]
pub async fn show_menu(
    path: web::Path<String>,
    params: web::Query<MenuQuery>,
    session: Session,
    repo: web::Data<FallbackRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let slug = path.into_inner();
    let search = params
        .0
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(ToString::to_string);

    match get_menu_for_slug(repo.get_ref(), &slug, search.as_deref()) {
        Ok(menu) => {
            let cart = cart_from_session(&session);

            let mut context = Context::new();
            context.insert("alerts", &collect_alerts(&flash_messages));
            context.insert("restaurant", &menu.restaurant);
            context.insert("categories", &menu.categories);
            context.insert("search", &search);
            context.insert("cart", &cart);
            context.insert("cart_total_cents", &cart.total_cents());
            context.insert("cart_item_count", &cart.item_count());
            render_template(&tera, "menu/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let mut context = Context::new();
            context.insert("slug", &slug);
            let body = match tera.render("menu/not_found.html", &context) {
                Ok(body) => body,
                Err(err) => {
                    log::error!("Failed to render template menu/not_found.html: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            };
            HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(body)
        }
        Err(err) => {
            log::error!("Failed to load menu for {slug}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/menu/{slug}/cart/add")]
pub async fn cart_add(
    path: web::Path<String>,
    session: Session,
    repo: web::Data<FallbackRepository>,
    form: web::Form<CartItemForm>,
) -> impl Responder {
    let slug = path.into_inner();
    let mut cart = cart_from_session(&session);

    match add_item(repo.get_ref(), &mut cart, &slug, form.item_id) {
        Ok(()) => store_cart_and_return(&session, &cart, &slug),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("That item is no longer available.").send();
            redirect(&format!("/menu/{slug}"))
        }
        Err(err) => {
            log::error!("Failed to add item to cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/menu/{slug}/cart/remove")]
pub async fn cart_remove(
    path: web::Path<String>,
    session: Session,
    form: web::Form<CartItemForm>,
) -> impl Responder {
    let slug = path.into_inner();
    let mut cart = cart_from_session(&session);

    cart.remove(form.item_id);

    store_cart_and_return(&session, &cart, &slug)
}

#[post("/menu/{slug}/cart/update")]
pub async fn cart_update(
    path: web::Path<String>,
    session: Session,
    repo: web::Data<FallbackRepository>,
    form: web::Form<CartQuantityForm>,
) -> impl Responder {
    let slug = path.into_inner();
    let mut cart = cart_from_session(&session);

    match set_quantity(
        repo.get_ref(),
        &mut cart,
        &slug,
        form.item_id,
        form.quantity,
    ) {
        Ok(()) => store_cart_and_return(&session, &cart, &slug),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("That item is no longer available.").send();
            redirect(&format!("/menu/{slug}"))
        }
        Err(err) => {
            log::error!("Failed to update cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/menu/{slug}/cart/clear")]
pub async fn cart_clear(path: web::Path<String>, session: Session) -> impl Responder {
    let slug = path.into_inner();
    let mut cart = cart_from_session(&session);

    cart.clear();

    store_cart_and_return(&session, &cart, &slug)
}

#[post("/menu/{slug}/order")]
pub async fn cart_place_order(path: web::Path<String>, session: Session) -> impl Responder {
    let slug = path.into_inner();
    let mut cart = cart_from_session(&session);

    match place_order(&mut cart) {
        Ok(summary) => {
            FlashMessage::success(format!(
                "Order placed: {} items, total {:.2}. The restaurant will call you.",
                summary.item_count,
                summary.total_cents as f64 / 100.0
            ))
            .send();
            store_cart_and_return(&session, &cart, &slug)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/menu/{slug}"))
        }
        Err(err) => {
            log::error!("Failed to place order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Read the diner's cart out of the cookie session. A missing or corrupt
/// value reads as an empty cart.
fn cart_from_session(session: &Session) -> Cart {
    session
        .get::<Cart>(CART_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn store_cart_and_return(session: &Session, cart: &Cart, slug: &str) -> HttpResponse {
    if let Err(err) = session.insert(CART_SESSION_KEY, cart) {
        log::error!("Failed to persist cart in session: {err}");
        return HttpResponse::InternalServerError().finish();
    }
    redirect(&format!("/menu/{slug}"))
}
