use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Conta de usuário (collection `users`)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: i64,  // PRIMARY IDENTIFIER - numeric, used as session key
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            user_id: user.user_id,
            username: user.username.clone(),
        }
    }
}
