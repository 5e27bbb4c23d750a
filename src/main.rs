use std::collections::HashMap;
use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use menufy::PLACEHOLDER_DATABASE_URL;
use menufy::db::establish_connection_pool;
use menufy::middleware::RedirectUnauthorized;
use menufy::repository::{DieselRepository, FallbackRepository, LocalRepository};
use menufy::routes::api::{
    api_create_category, api_create_item, api_create_restaurant, api_list_categories,
    api_list_items, api_list_restaurants, api_menu,
};
use menufy::routes::categories::{add_category, delete_category, edit_category};
use menufy::routes::items::{add_item, delete_item, edit_item, upload_items};
use menufy::routes::main::{logout, process_signin, show_index, show_signin};
use menufy::routes::menu::{
    cart_add, cart_clear, cart_place_order, cart_remove, cart_update, show_menu,
};
use menufy::routes::restaurants::{
    add_restaurant, delete_restaurant, edit_restaurant, show_restaurant,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());
    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let data_dir = env::var("MENUFY_DATA_DIR").unwrap_or("local_data".to_string());
    let local = LocalRepository::new(&data_dir);

    // Demo mode: no usable DATABASE_URL means every call goes to the local
    // store. A configured but failing backend also degrades per call.
    let backend = match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() && url != PLACEHOLDER_DATABASE_URL => {
            match establish_connection_pool(&url) {
                Ok(pool) => Some(DieselRepository::new(pool)),
                Err(e) => {
                    log::error!("Failed to establish database connection: {e}");
                    log::warn!("Continuing in demo mode with local storage");
                    None
                }
            }
        }
        _ => {
            log::info!("DATABASE_URL not configured, running in demo mode");
            None
        }
    };

    let repo = FallbackRepository::new(backend, local);

    if repo.is_demo() {
        if let Err(e) = repo.local().seed_demo_data() {
            log::warn!("Failed to seed demo data: {e}");
        }
    }

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };
    tera.register_filter("money", money_filter);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_signin)
            .service(process_signin)
            .service(show_menu)
            .service(cart_add)
            .service(cart_remove)
            .service(cart_update)
            .service(cart_clear)
            .service(cart_place_order)
            .service(api_menu)
            .service(api_list_restaurants)
            .service(api_create_restaurant)
            .service(api_list_categories)
            .service(api_create_category)
            .service(api_list_items)
            .service(api_create_item)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(show_restaurant)
                    .service(add_restaurant)
                    .service(edit_restaurant)
                    .service(delete_restaurant)
                    .service(add_category)
                    .service(edit_category)
                    .service(delete_category)
                    .service(add_item)
                    .service(edit_item)
                    .service(delete_item)
                    .service(upload_items)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}

/// Tera filter rendering an integer amount in the smallest currency unit
/// as a two-decimal display value.
fn money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let cents = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("money expects an integer amount"))?;
    Ok(tera::Value::String(format!("{:.2}", cents as f64 / 100.0)))
}
