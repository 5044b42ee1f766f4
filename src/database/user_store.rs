use super::{is_duplicate_key, MongoDB, COUNTERS_COLLECTION, USERS_COLLECTION};
use crate::{models::User, store::UserStore, utils::error::AppError};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::ReturnDocument,
    Collection,
};

/// Contas no MongoDB. `user_id` numérico vem de um contador em `counters`.
#[derive(Clone)]
pub struct MongoUserStore {
    users: Collection<User>,
    counters: Collection<Document>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            users: db.collection::<User>(USERS_COLLECTION),
            counters: db.collection::<Document>(COUNTERS_COLLECTION),
        }
    }

    async fn next_user_id(&self) -> Result<i64, AppError> {
        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": "user_id" }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::DatabaseError("user_id counter missing".to_string()))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("Invalid user_id counter: {}", e)))
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create_user(&self, username: &str, password_hash: String) -> Result<User, AppError> {
        if self.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(format!("User '{}' already exists", username)));
        }

        let user = User {
            id: None,
            user_id: self.next_user_id().await?,
            username: username.to_string(),
            password_hash,
            created_at: chrono::Utc::now().timestamp(),
        };

        match self.users.insert_one(&user).await {
            Ok(result) => Ok(User {
                id: result.inserted_id.as_object_id(),
                ..user
            }),
            // corrida entre o find e o insert
            Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(format!(
                "User '{}' already exists",
                username
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_user(&self, username: &str) -> Result<bool, AppError> {
        let result = self.users.delete_one(doc! { "username": username }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_one(doc! { "username": username }).await?)
    }
}
