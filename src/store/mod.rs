// ==================== STORAGE CONTRACTS ====================
// Contratos de persistência usados pelo núcleo de favoritos e pelas contas.
// Implementações: MongoDB (crate::database) e memória (memory.rs).

pub mod memory;

pub use memory::*;

use crate::{
    models::{ScholarshipRecord, User},
    utils::error::AppError,
};
use async_trait::async_trait;

/// Persistência de sessões keyed por `user_id`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Snapshot salvo para o usuário, ou `None` se não existe sessão
    async fn find(&self, user_id: i64) -> Result<Option<Vec<ScholarshipRecord>>, AppError>;

    /// Cria a sessão. Fails with `AppError::DuplicateSession` if one exists.
    async fn insert(&self, user_id: i64, favorites: Vec<ScholarshipRecord>) -> Result<(), AppError>;

    /// Sobrescreve `favorites` somente se a sessão existir (sem upsert).
    /// Returns the matched count, 0 or 1.
    async fn update(&self, user_id: i64, favorites: &[ScholarshipRecord]) -> Result<u64, AppError>;
}

/// Contas de usuário. Senhas chegam aqui já com hash.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` if the username is taken.
    async fn create_user(&self, username: &str, password_hash: String) -> Result<User, AppError>;

    /// `true` se a conta existia e foi removida
    async fn delete_user(&self, username: &str) -> Result<bool, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}
