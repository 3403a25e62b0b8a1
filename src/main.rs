#[macro_use]
extern crate rocket;

mod api;
mod cors;
mod database;
mod db;
mod env;
mod error;
mod export;
mod models;
mod services;
mod telemetry;
#[cfg(test)]
mod test;

use api::{
    api_add_student, api_export_students, api_get_students, api_load_sample_data, api_scan,
    health,
};
use cors::{Cors, preflight};
use database::create_table;
use env::{database_url, load_environment, log_env_files, photos_dir};
use error::{bad_request, internal_error, not_found, unprocessable_entity};
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use telemetry::{TelemetryFairing, init_tracing};
use tracing::info;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    // Env files may set RUST_LOG, so they are read before the subscriber
    // is installed and reported right after.
    let env_files = load_environment()?;
    init_tracing();
    log_env_files(&env_files);

    let database_url = database_url();
    info!("Connecting to {}", database_url);
    let pool = SqlitePoolOptions::new().connect(&database_url).await?;

    info!("Running database migrations...");
    create_table(&pool).await?;
    info!("Migrations completed successfully");

    init_rocket(pool)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}

pub fn init_rocket(pool: SqlitePool) -> Rocket<Build> {
    info!("Starting QR attendance service");

    let mut rocket = rocket::build()
        .manage(pool)
        .mount(
            "/",
            routes![
                api_add_student,
                api_scan,
                api_get_students,
                api_export_students,
                api_load_sample_data,
                health,
                preflight,
            ],
        )
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable_entity, internal_error],
        )
        .attach(TelemetryFairing)
        .attach(Cors);

    let photos = photos_dir();
    if photos.is_dir() {
        info!("Serving photos from {}", photos.display());
        rocket = rocket.mount("/photos", FileServer::from(photos));
    }

    rocket
}
