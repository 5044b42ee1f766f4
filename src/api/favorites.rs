use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use crate::{
    api::MessageResponse,
    models::{AddOutcome, RemoveOutcome, ScholarshipKey, ScholarshipPayload, ScholarshipRecord},
    state::AppState,
    utils::error::AppError,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddFavoriteRequest {
    pub user_id: Option<i64>,
    pub scholarship: Option<ScholarshipPayload>,
}

/// Remoção só precisa da chave de identidade
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RemoveFavoriteRequest {
    pub user_id: Option<i64>,
    pub university: Option<String>,
    pub scholarship_name: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClearFavoritesRequest {
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FavoritesResponse {
    pub status: String,
    pub user_id: i64,
    pub count: usize,
    pub favorites: Vec<ScholarshipRecord>,
}

fn missing(what: &str) -> HttpResponse {
    AppError::InvalidRequest(format!("Missing {}", what)).error_response()
}

/// GET /api/favorites/{user_id}
#[utoipa::path(
    get,
    path = "/api/favorites/{user_id}",
    tag = "Favorites",
    params(("user_id" = i64, Path, description = "Numeric user id")),
    responses(
        (status = 200, description = "Favorites in insertion order", body = FavoritesResponse)
    )
)]
pub async fn get_user_favorites(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
) -> HttpResponse {
    let user_id = user_id.into_inner();
    log::info!("📋 GET /favorites/{}", user_id);

    let favorites = match state.favorites.get(user_id).await {
        Some(collection) => collection.lock().await.list().to_vec(),
        None => Vec::new(),
    };

    HttpResponse::Ok().json(FavoritesResponse {
        status: "success".to_string(),
        user_id,
        count: favorites.len(),
        favorites,
    })
}

/// POST /api/favorites/add
#[utoipa::path(
    post,
    path = "/api/favorites/add",
    tag = "Favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 200, description = "Added, or already present (no-op)", body = MessageResponse),
        (status = 400, description = "Missing or invalid user_id / scholarship")
    )
)]
pub async fn add_to_favorites(
    state: web::Data<AppState>,
    request: web::Json<AddFavoriteRequest>,
) -> HttpResponse {
    let AddFavoriteRequest { user_id, scholarship } = request.into_inner();
    let (Some(user_id), Some(payload)) = (user_id, scholarship) else {
        return missing("user_id or scholarship");
    };

    let scholarship = match ScholarshipRecord::parse(payload) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("⚠️ Invalid scholarship for user {}: {}", user_id, e);
            return e.error_response();
        }
    };

    log::info!("⭐ POST /favorites/add - user {}: {}", user_id, scholarship.identity_key());

    let collection = state.favorites.collection(user_id).await;
    let outcome = collection.lock().await.add(scholarship);

    let message = match outcome {
        AddOutcome::Added => "Scholarship added to favorites",
        AddOutcome::Duplicate => "Scholarship already in favorites",
    };
    HttpResponse::Ok().json(MessageResponse::success(message))
}

/// POST /api/favorites/remove
#[utoipa::path(
    post,
    path = "/api/favorites/remove",
    tag = "Favorites",
    request_body = RemoveFavoriteRequest,
    responses(
        (status = 200, description = "Removed, or not present (no-op)", body = MessageResponse),
        (status = 400, description = "Missing user_id, university or scholarship_name")
    )
)]
pub async fn remove_from_favorites(
    state: web::Data<AppState>,
    request: web::Json<RemoveFavoriteRequest>,
) -> HttpResponse {
    let non_empty = |value: &Option<String>| {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
    };
    let (Some(user_id), Some(university), Some(scholarship_name)) = (
        request.user_id,
        non_empty(&request.university),
        non_empty(&request.scholarship_name),
    ) else {
        return missing("user_id, university or scholarship_name");
    };

    let key = ScholarshipKey::new(&university, &scholarship_name);
    log::info!("🗑️  POST /favorites/remove - user {}: {}", user_id, key);

    let outcome = match state.favorites.get(user_id).await {
        Some(collection) => collection.lock().await.remove_by_key(&key),
        None => {
            log::error!("Scholarship not in favorites, cannot be removed: {}", key);
            RemoveOutcome::NotFound
        }
    };

    let message = match outcome {
        RemoveOutcome::Removed => "Scholarship removed from favorites",
        RemoveOutcome::NotFound => "Scholarship not in favorites",
    };
    HttpResponse::Ok().json(MessageResponse::success(message))
}

/// POST /api/favorites/clear
#[utoipa::path(
    post,
    path = "/api/favorites/clear",
    tag = "Favorites",
    request_body = ClearFavoritesRequest,
    responses(
        (status = 200, description = "All favorites removed", body = MessageResponse),
        (status = 400, description = "Missing user_id")
    )
)]
pub async fn clear_favorites(
    state: web::Data<AppState>,
    request: web::Json<ClearFavoritesRequest>,
) -> HttpResponse {
    let Some(user_id) = request.user_id else {
        return missing("user_id");
    };

    log::info!("🧹 POST /favorites/clear - user {}", user_id);

    if let Some(collection) = state.favorites.get(user_id).await {
        collection.lock().await.clear();
    }
    HttpResponse::Ok().json(MessageResponse::success("Favorites cleared"))
}
