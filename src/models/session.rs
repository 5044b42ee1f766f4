use super::scholarship::ScholarshipRecord;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Sessão persistida (collection `sessions`), uma por usuário
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Chave única (índice unique em `user_id`)
    pub user_id: i64,

    /// Snapshot dos favoritos no último logout
    #[serde(default)]
    pub favorites: Vec<ScholarshipRecord>,

    pub created_at: i64,
    pub updated_at: i64,
}

impl SessionDocument {
    pub fn new(user_id: i64, favorites: Vec<ScholarshipRecord>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: None,
            user_id,
            favorites,
            created_at: now,
            updated_at: now,
        }
    }
}
