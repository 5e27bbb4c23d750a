use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::DEMO_OWNER_ID;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::AddCategoryForm;
use crate::forms::items::AddMenuItemForm;
use crate::forms::restaurants::AddRestaurantForm;
use crate::repository::FallbackRepository;
use crate::services::menu::get_menu_for_slug;
use crate::services::{ServiceError, categories, items, restaurants};

/// Query accepted by `GET /api/menu-categories`.
#[derive(Debug, Deserialize)]
pub struct CategoriesApiQuery {
    pub restaurant_id: Option<i32>,
}

/// Query accepted by `GET /api/menu-items`.
#[derive(Debug, Deserialize)]
pub struct ItemsApiQuery {
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

#[get("/api/restaurants/{slug}/menu")]
/// Public menu of an active restaurant as nested `categories[].items[]`.
pub async fn api_menu(
    path: web::Path<String>,
    repo: web::Data<FallbackRepository>,
) -> impl Responder {
    let slug = path.into_inner();

    match get_menu_for_slug(repo.get_ref(), &slug, None) {
        Ok(menu) => HttpResponse::Ok().json(menu),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({"error": "Restaurant not found"}))
        }
        Err(err) => {
            log::error!("Failed to load menu for {slug}: {err}");
            HttpResponse::InternalServerError().json(json!({"error": "Internal server error"}))
        }
    }
}

#[get("/api/restaurants")]
/// Restaurants owned by the authenticated caller.
pub async fn api_list_restaurants(
    user: Option<AuthenticatedUser>,
    repo: web::Data<FallbackRepository>,
) -> impl Responder {
    let Some(caller) = resolve_caller(user, repo.get_ref()) else {
        return unauthorized();
    };

    match restaurants::list_owned_restaurants(repo.get_ref(), &caller.sub) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => service_error_response(err, "Failed to list restaurants"),
    }
}

#[post("/api/restaurants")]
/// Create a restaurant; 201 with the created record on success.
pub async fn api_create_restaurant(
    user: Option<AuthenticatedUser>,
    repo: web::Data<FallbackRepository>,
    body: web::Json<AddRestaurantForm>,
) -> impl Responder {
    let Some(caller) = resolve_caller(user, repo.get_ref()) else {
        return unauthorized();
    };

    match restaurants::create_restaurant(repo.get_ref(), &caller.sub, body.into_inner()) {
        Ok(restaurant) => HttpResponse::Created().json(restaurant),
        Err(err) => service_error_response(err, "Failed to create restaurant"),
    }
}

#[get("/api/menu-categories")]
/// Active categories of a restaurant, in render order.
pub async fn api_list_categories(
    params: web::Query<CategoriesApiQuery>,
    repo: web::Data<FallbackRepository>,
) -> impl Responder {
    let Some(restaurant_id) = params.restaurant_id else {
        return HttpResponse::BadRequest().json(json!({"error": "Restaurant ID is required"}));
    };

    match categories::list_active_categories(repo.get_ref(), restaurant_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => service_error_response(err, "Failed to list categories"),
    }
}

#[post("/api/menu-categories")]
/// Create a category; the caller must own the target restaurant.
pub async fn api_create_category(
    user: Option<AuthenticatedUser>,
    repo: web::Data<FallbackRepository>,
    body: web::Json<AddCategoryForm>,
) -> impl Responder {
    let Some(caller) = resolve_caller(user, repo.get_ref()) else {
        return unauthorized();
    };

    match categories::create_category(repo.get_ref(), &caller, body.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => service_error_response(err, "Failed to create category"),
    }
}

#[get("/api/menu-items")]
/// Available items of a restaurant, optionally filtered by category.
pub async fn api_list_items(
    params: web::Query<ItemsApiQuery>,
    repo: web::Data<FallbackRepository>,
) -> impl Responder {
    let Some(restaurant_id) = params.restaurant_id else {
        return HttpResponse::BadRequest().json(json!({"error": "Restaurant ID is required"}));
    };

    match items::list_available_items(repo.get_ref(), restaurant_id, params.category_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => service_error_response(err, "Failed to list items"),
    }
}

#[post("/api/menu-items")]
/// Create a menu item; the caller must own the target restaurant.
pub async fn api_create_item(
    user: Option<AuthenticatedUser>,
    repo: web::Data<FallbackRepository>,
    body: web::Json<AddMenuItemForm>,
) -> impl Responder {
    let Some(caller) = resolve_caller(user, repo.get_ref()) else {
        return unauthorized();
    };

    match items::create_menu_item(repo.get_ref(), &caller, body.into_inner()) {
        Ok(item) => HttpResponse::Created().json(item),
        Err(err) => service_error_response(err, "Failed to create item"),
    }
}

/// The acting identity for API write calls: the authenticated caller, or
/// the fixed demo owner when running without a database backend.
/// Authorization failures themselves are never downgraded.
fn resolve_caller(
    user: Option<AuthenticatedUser>,
    repo: &FallbackRepository,
) -> Option<AuthenticatedUser> {
    match user {
        Some(user) => Some(user),
        None if repo.is_demo() => Some(AuthenticatedUser::new(
            DEMO_OWNER_ID,
            "demo@menufy.local",
            "Demo Owner",
        )),
        None => None,
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}))
}

fn service_error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => unauthorized(),
        ServiceError::Forbidden => HttpResponse::Forbidden().json(json!({"error": "Forbidden"})),
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({"error": "Not found"})),
        ServiceError::Conflict => {
            HttpResponse::Conflict().json(json!({"error": "Already exists"}))
        }
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({"error": message})),
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(json!({"error": "Internal server error"}))
        }
    }
}
