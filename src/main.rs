mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::{AppConfig, StorageBackend};
use dotenv::dotenv;
use services::catalog_service::{CatalogProvider, NotionCatalog};
use state::AppState;
use std::sync::Arc;
use store::{InMemorySessionStore, InMemoryUserStore, SessionStore, UserStore};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().expect("Invalid configuration");

    log::info!("🚀 Starting Scholarship Service...");

    // Stores: MongoDB em produção, memória para desenvolvimento local
    let (sessions, users): (Arc<dyn SessionStore>, Arc<dyn UserStore>) = match config.storage_backend {
        StorageBackend::MongoDB => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            let db = database::MongoDB::new(database_url)
                .await
                .expect("Failed to connect to MongoDB");

            log::info!("✅ MongoDB connected successfully");
            (
                Arc::new(database::MongoSessionStore::new(&db)) as Arc<dyn SessionStore>,
                Arc::new(database::MongoUserStore::new(&db)) as Arc<dyn UserStore>,
            )
        }
        StorageBackend::Memory => {
            log::warn!("⚠️  STORAGE_BACKEND=memory: sessions and users are lost on restart");
            (
                Arc::new(InMemorySessionStore::new()) as Arc<dyn SessionStore>,
                Arc::new(InMemoryUserStore::new()) as Arc<dyn UserStore>,
            )
        }
    };

    if config.notion_api_key.is_empty() || config.notion_database_id.is_empty() {
        log::warn!("⚠️  NOTION_API_KEY / NOTION_DATABASE_ID not set, catalog requests will fail");
    }

    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("Failed to build HTTP client");

    let catalog: Arc<dyn CatalogProvider> = Arc::new(NotionCatalog::new(
        http_client,
        &config.notion_api_base,
        &config.notion_api_key,
        &config.notion_database_id,
    ));

    let app_state = web::Data::new(AppState::new(sessions, users, catalog, config.bcrypt_cost));

    let host = config.host.clone();
    let port = config.port;
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
            .default_service(web::to(api::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
