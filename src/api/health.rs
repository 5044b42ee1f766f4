use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Usuários com favoritos carregados em memória
    pub live_collections: usize,
    pub timestamp: i64,
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let live_collections = state.favorites.len().await;
    log::debug!("💓 Health check ({} live collections)", live_collections);

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        live_collections,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
