use actix_web::{web, HttpResponse, ResponseError};
use crate::{
    api::MessageResponse,
    models::UserInfo,
    services::auth_service::{self, CredentialsRequest, DeleteUserRequest},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/create-user",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 400, description = "Missing username or password"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /create-user - username: {}", username);

    match auth_service::register(state.users.as_ref(), &request, state.bcrypt_cost).await {
        Ok(user) => {
            log::info!("✅ User added: {}", user.username);
            HttpResponse::Created().json(serde_json::json!({
                "status": "user added",
                "user": UserInfo::from(&user)
            }))
        }
        Err(e) => {
            log::warn!("❌ Failed to add user {}: {}", username, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/delete-user",
    tag = "Users",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Missing username"),
        (status = 404, description = "Unknown username")
    )
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    request: web::Json<DeleteUserRequest>,
) -> HttpResponse {
    let username = request.username.as_deref().unwrap_or("N/A");
    log::info!("🗑️  DELETE /delete-user - username: {}", username);

    match auth_service::delete_user(state.users.as_ref(), &request).await {
        Ok(user) => {
            // a sessão persistida fica; só a coleção viva é descartada
            state.favorites.discard(user.user_id).await;
            HttpResponse::Ok().json(MessageResponse::success(format!("user deleted: {}", user.username)))
        }
        Err(e) => {
            log::warn!("❌ Failed to delete user {}: {}", username, e);
            e.error_response()
        }
    }
}
