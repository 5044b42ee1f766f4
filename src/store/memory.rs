use super::{SessionStore, UserStore};
use crate::{
    models::{ScholarshipRecord, User},
    utils::error::AppError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Sessões em memória (STORAGE_BACKEND=memory e testes)
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<i64, Vec<ScholarshipRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find(&self, user_id: i64) -> Result<Option<Vec<ScholarshipRecord>>, AppError> {
        Ok(self.sessions.read().await.get(&user_id).cloned())
    }

    async fn insert(&self, user_id: i64, favorites: Vec<ScholarshipRecord>) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&user_id) {
            return Err(AppError::DuplicateSession(user_id));
        }
        sessions.insert(user_id, favorites);
        Ok(())
    }

    async fn update(&self, user_id: i64, favorites: &[ScholarshipRecord]) -> Result<u64, AppError> {
        match self.sessions.write().await.get_mut(&user_id) {
            Some(stored) => {
                *stored = favorites.to_vec();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Contas em memória, ids sequenciais a partir de 1
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    next_id: RwLock<i64>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, username: &str, password_hash: String) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(AppError::Conflict(format!("User '{}' already exists", username)));
        }

        let mut next_id = self.next_id.write().await;
        *next_id += 1;

        let user = User {
            id: None,
            user_id: *next_id,
            username: username.to_string(),
            password_hash,
            created_at: chrono::Utc::now().timestamp(),
        };
        users.insert(username.to_string(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.write().await.remove(username).is_some())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}
