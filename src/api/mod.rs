pub mod favorites;
pub mod health;
pub mod metrics;
pub mod scholarships;
pub mod sessions;
pub mod swagger;
pub mod users;

use crate::utils::error::AppError;
use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

/// Registra todas as rotas da API (usado por `main` e pelos testes)
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Body JSON inválido vira o mesmo formato de erro do resto da API
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    });

    cfg.app_data(json_config)
        // Health check
        .route("/api/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // User management
        .route("/api/create-user", web::post().to(users::create_user))
        .route("/api/delete-user", web::delete().to(users::delete_user))
        // Sessions: login/logout sincronizam favoritos com a SessionStore
        .route("/api/login", web::post().to(sessions::login))
        .route("/api/logout", web::post().to(sessions::logout))
        // Scholarships catalog (Notion)
        .service(
            web::scope("/api/scholarships")
                .route("", web::get().to(scholarships::get_all_scholarships))
                .route("/type/{scholarship_type}", web::get().to(scholarships::get_scholarships_by_type))
                .route("/country/{country}", web::get().to(scholarships::get_scholarships_by_country))
                .route("/degree/{degree_level}", web::get().to(scholarships::get_scholarships_by_degree_level))
                .route("/gpa/{gpa}", web::get().to(scholarships::get_scholarships_by_gpa))
                .route("/sort/deadline", web::get().to(scholarships::get_scholarships_by_deadline))
        )
        // Favorites
        .service(
            web::scope("/api/favorites")
                .route("/add", web::post().to(favorites::add_to_favorites))
                .route("/remove", web::post().to(favorites::remove_from_favorites))
                .route("/clear", web::post().to(favorites::clear_favorites))
                .route("/{user_id}", web::get().to(favorites::get_user_favorites))
        );
}

/// Resposta JSON para rotas inexistentes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "status": "error",
        "message": "Resource not found"
    }))
}
