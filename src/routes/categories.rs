use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::FallbackRepository;
use crate::routes::main::dashboard_error;
use crate::routes::redirect;
use crate::services::categories::{create_category, modify_category, remove_category};

/// Body of the category delete form; carries the owning restaurant so the
/// deletion can be scoped and the redirect can go back to the right page.
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryForm {
    pub restaurant_id: i32,
}

#[post("/categories/add")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<AddCategoryForm>,
) -> impl Responder {
    let back = format!("/restaurants/{}", form.restaurant_id);

    match create_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" added.", category.name)).send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to create category", &back),
    }
}

#[post("/categories/edit")]
pub async fn edit_category(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<EditCategoryForm>,
) -> impl Responder {
    let back = format!("/restaurants/{}", form.restaurant_id);

    match modify_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" updated.", category.name)).send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to update category", &back),
    }
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<DeleteCategoryForm>,
) -> impl Responder {
    let category_id = path.into_inner();
    let back = format!("/restaurants/{}", form.restaurant_id);

    match remove_category(repo.get_ref(), &user, form.restaurant_id, category_id) {
        Ok(()) => {
            FlashMessage::success("Category and its items deleted.").send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to delete category", &back),
    }
}
