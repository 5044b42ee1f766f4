use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use crate::{
    api::MessageResponse,
    models::{FavoritesCollection, ScholarshipRecord},
    services::{auth_service::{self, CredentialsRequest}, session_sync},
    state::AppState,
    utils::error::AppError,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LogoutRequest {
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub user_id: i64,
    pub username: String,
    pub favorites: Vec<ScholarshipRecord>,
}

/// POST /api/login - Valida credenciais e carrega a sessão de favoritos
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Sessions",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in, favorites restored", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /login - username: {}", username);

    let user = match auth_service::authenticate(state.users.as_ref(), &request).await {
        Ok(user) => user,
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", username, e);
            return e.error_response();
        }
    };

    let collection = state.favorites.collection(user.user_id).await;
    let mut favorites = collection.lock().await;

    match session_sync::login_user(state.sessions.as_ref(), user.user_id, &mut favorites).await {
        Ok(()) => {
            log::info!("✅ Login successful: {} ({} favorites)", user.username, favorites.len());
            HttpResponse::Ok().json(LoginResponse {
                status: "success".to_string(),
                user_id: user.user_id,
                username: user.username,
                favorites: favorites.list().to_vec(),
            })
        }
        Err(e) => {
            log::error!("❌ Failed to load session for user {}: {}", user.user_id, e);
            e.error_response()
        }
    }
}

/// POST /api/logout - Persiste os favoritos e limpa a coleção em memória
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Sessions",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Favorites saved, user logged out", body = MessageResponse),
        (status = 400, description = "Missing user_id or no session for user")
    )
)]
pub async fn logout(
    state: web::Data<AppState>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse {
    let Some(user_id) = request.user_id else {
        return AppError::InvalidRequest("Missing user_id".to_string()).error_response();
    };

    log::info!("🚪 POST /logout - user {}", user_id);

    // Sem coleção viva, persiste uma lista vazia
    let live = state.favorites.get(user_id).await;
    let mut detached = FavoritesCollection::new(user_id);
    let mut guard = match &live {
        Some(collection) => Some(collection.lock().await),
        None => None,
    };
    let favorites = guard.as_deref_mut().unwrap_or(&mut detached);

    let result = session_sync::logout_user(state.sessions.as_ref(), user_id, favorites).await;
    drop(guard);

    match result {
        Ok(()) => {
            if live.is_some() {
                state.favorites.discard(user_id).await;
            }
            log::info!("✅ User {} logged out", user_id);
            HttpResponse::Ok().json(MessageResponse::success(format!("User {} logged out", user_id)))
        }
        Err(e @ AppError::SessionNotFound(_)) => {
            log::warn!("⚠️ Logout rejected: {}", e);
            e.error_response()
        }
        Err(e) => {
            log::error!("❌ Error during logout for user {}: {}", user_id, e);
            e.error_response()
        }
    }
}
