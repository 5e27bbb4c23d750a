pub mod db;
pub mod domain;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Owner identity assigned to records created without an authenticated
/// caller while the service is running against the local store.
pub const DEMO_OWNER_ID: &str = "demo-owner";

/// `DATABASE_URL` value that explicitly requests demo mode.
pub const PLACEHOLDER_DATABASE_URL: &str = "placeholder";
