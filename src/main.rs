pub mod modules;
pub use modules::post_image;
mod api;
pub mod health;
mod shared;

use crate::api::openapi::ApiDoc;
use crate::post_image::adapter::outgoing::{
    cloud_storage::GcsBlobStore, codec::FirImageCodec, db::PostImageStorePostgres,
    token::UuidTokenGenerator,
};
use crate::post_image::application::{
    domain::policies::post_image_config::PostImageConfig,
    ports::incoming::services::UploadPostImageService,
    post_image_use_cases::PostImageUseCases,
};
use crate::shared::api::custom_json_config;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

/// Upper bound for the JSON request body, base64 overhead included.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub post_image: PostImageUseCases,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    // Try .env.{environment} first, then fall back to .env
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(environment = %env, "Starting application...");

    // Load Env. variables
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL is not set in .env file")?;
    let host = env::var("HOST").context("HOST is not set in .env file")?;
    let port = env::var("PORT").context("PORT is not set in .env file")?;
    let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("MAX_UPLOAD_BYTES has an invalid value: {}", raw))?,
        Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
    };

    let post_image_config = PostImageConfig::from_env().context("Invalid post image config")?;
    info!(
        bucket = %post_image_config.bucket_name,
        table = %post_image_config.table_name,
        max_thumbnail_resolution = post_image_config.max_thumbnail_resolution,
        thumbnail_format = %post_image_config.thumbnail_format,
        "Post image config loaded"
    );

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    let db_arc = Arc::new(conn);

    // Adapters and use cases
    let upload_post_image = UploadPostImageService::new(
        GcsBlobStore::new(),
        PostImageStorePostgres::new(Arc::clone(&db_arc)),
        FirImageCodec::new(),
        UuidTokenGenerator::new(),
        post_image_config,
    );

    let state = AppState {
        post_image: PostImageUseCases {
            upload: Arc::new(upload_post_image),
        },
    };

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config(max_upload_bytes))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Post images
    cfg.service(crate::post_image::adapter::incoming::web::routes::upload_post_image_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
