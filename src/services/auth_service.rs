use crate::{
    models::User,
    store::UserStore,
    utils::error::AppError,
};
use bcrypt::{hash, verify};
use serde::Deserialize;

// Request structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DeleteUserRequest {
    pub username: Option<String>,
}

/// Valida username/password obrigatórios (não vazios)
pub fn require_credentials(request: &CredentialsRequest) -> Result<(&str, &str), AppError> {
    match (request.username.as_deref(), request.password.as_deref()) {
        (Some(username), Some(password)) if !username.trim().is_empty() && !password.is_empty() => {
            Ok((username.trim(), password))
        }
        _ => Err(AppError::InvalidRequest(
            "Invalid input, both username and password are required".to_string(),
        )),
    }
}

// User registration
pub async fn register(
    users: &dyn UserStore,
    request: &CredentialsRequest,
    bcrypt_cost: u32,
) -> Result<User, AppError> {
    let (username, password) = require_credentials(request)?;

    if users.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict(format!("User '{}' already exists", username)));
    }

    let password_hash = hash_password(password, bcrypt_cost).await?;
    let user = users.create_user(username, password_hash).await?;

    log::info!("✅ User registered successfully: {} (id {})", user.username, user.user_id);
    Ok(user)
}

// Credential check
pub async fn authenticate(users: &dyn UserStore, request: &CredentialsRequest) -> Result<User, AppError> {
    let (username, password) = require_credentials(request)?;

    let user = users
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(password, &user.password_hash).await? {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(user)
}

// Delete account (a sessão persistida não é removida aqui)
pub async fn delete_user(users: &dyn UserStore, request: &DeleteUserRequest) -> Result<User, AppError> {
    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Invalid input, username is required".to_string()))?;

    let user = users
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))?;

    if !users.delete_user(username).await? {
        return Err(AppError::NotFound(format!("User '{}'", username)));
    }

    log::info!("🗑️  User deleted: {}", username);
    Ok(user)
}

// bcrypt é CPU-bound: roda fora do worker do actix
async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::InternalError(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {}", e)))
}
