use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::restaurants::{AddRestaurantForm, EditRestaurantForm};
use crate::repository::FallbackRepository;
use crate::routes::main::dashboard_error;
use crate::routes::{base_context, redirect, render_template};
use crate::services::restaurants::{
    create_restaurant, load_restaurant_page, modify_restaurant, remove_restaurant,
};

#[get("/restaurants/{restaurant_id}")]
pub async fn show_restaurant(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let restaurant_id = path.into_inner();

    match load_restaurant_page(repo.get_ref(), &user, restaurant_id) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "restaurants");
            context.insert("restaurant", &data.restaurant);
            context.insert("categories", &data.categories);
            context.insert("items", &data.items);
            context.insert("menu_path", &data.menu_path);
            context.insert("demo_mode", &repo.is_demo());
            render_template(&tera, "restaurants/show.html", &context)
        }
        Err(err) => dashboard_error(err, "Failed to load restaurant page", "/"),
    }
}

#[post("/restaurants/add")]
pub async fn add_restaurant(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<AddRestaurantForm>,
) -> impl Responder {
    match create_restaurant(repo.get_ref(), &user.sub, form.into_inner()) {
        Ok(restaurant) => {
            FlashMessage::success(format!("Restaurant \"{}\" created.", restaurant.name)).send();
            redirect(&format!("/restaurants/{}", restaurant.id))
        }
        Err(err) => dashboard_error(err, "Failed to create restaurant", "/"),
    }
}

#[post("/restaurants/edit")]
pub async fn edit_restaurant(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<EditRestaurantForm>,
) -> impl Responder {
    let restaurant_id = form.restaurant_id;
    let back = format!("/restaurants/{restaurant_id}");

    match modify_restaurant(repo.get_ref(), &user, form.into_inner()) {
        Ok(restaurant) => {
            FlashMessage::success(format!("Restaurant \"{}\" updated.", restaurant.name)).send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to update restaurant", &back),
    }
}

#[post("/restaurants/{restaurant_id}/delete")]
pub async fn delete_restaurant(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
) -> impl Responder {
    let restaurant_id = path.into_inner();

    match remove_restaurant(repo.get_ref(), &user, restaurant_id) {
        Ok(()) => {
            FlashMessage::success("Restaurant and its menu deleted.").send();
            redirect("/")
        }
        Err(err) => dashboard_error(err, "Failed to delete restaurant", "/"),
    }
}
