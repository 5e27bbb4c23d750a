use actix_multipart::form::MultipartForm;
use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::items::{AddMenuItemForm, EditMenuItemForm, UploadMenuItemsMultipart};
use crate::repository::FallbackRepository;
use crate::routes::main::dashboard_error;
use crate::routes::redirect;
use crate::services::items::{
    create_menu_item, import_menu_items, modify_menu_item, remove_menu_item,
};

/// Body of the item delete form; carries the owning restaurant so the
/// deletion can be scoped and the redirect can go back to the right page.
#[derive(Debug, Deserialize)]
pub struct DeleteMenuItemForm {
    pub restaurant_id: i32,
}

#[post("/items/add")]
pub async fn add_item(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<AddMenuItemForm>,
) -> impl Responder {
    let back = format!("/restaurants/{}", form.restaurant_id);

    match create_menu_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(item) => {
            FlashMessage::success(format!("Item \"{}\" added.", item.name)).send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to create item", &back),
    }
}

#[post("/items/edit")]
pub async fn edit_item(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<EditMenuItemForm>,
) -> impl Responder {
    let back = format!("/restaurants/{}", form.restaurant_id);

    match modify_menu_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(item) => {
            FlashMessage::success(format!("Item \"{}\" updated.", item.name)).send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to update item", &back),
    }
}

#[post("/items/{item_id}/delete")]
pub async fn delete_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    form: web::Form<DeleteMenuItemForm>,
) -> impl Responder {
    let item_id = path.into_inner();
    let back = format!("/restaurants/{}", form.restaurant_id);

    match remove_menu_item(repo.get_ref(), &user, form.restaurant_id, item_id) {
        Ok(()) => {
            FlashMessage::success("Item deleted.").send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to delete item", &back),
    }
}

#[post("/items/upload")]
pub async fn upload_items(
    user: AuthenticatedUser,
    repo: web::Data<FallbackRepository>,
    MultipartForm(form): MultipartForm<UploadMenuItemsMultipart>,
) -> impl Responder {
    let (restaurant_id, upload) = match form.into_parts() {
        Ok(parts) => parts,
        Err(err) => {
            log::error!("Failed to read uploaded CSV: {err}");
            FlashMessage::error("Could not read the uploaded file.").send();
            return redirect("/");
        }
    };
    let back = format!("/restaurants/{restaurant_id}");

    match import_menu_items(repo.get_ref(), &user, restaurant_id, upload) {
        Ok(created) => {
            FlashMessage::success(format!("Imported {created} items.")).send();
            redirect(&back)
        }
        Err(err) => dashboard_error(err, "Failed to import items", &back),
    }
}
