use crate::models::FavoritesCollection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub type SharedFavorites = Arc<Mutex<FavoritesCollection>>;

/// Coleções de favoritos vivas, uma por usuário ativo.
///
/// The per-user mutex serializes requests touching the same in-memory
/// collection. It gives no atomicity against the session store.
#[derive(Default)]
pub struct FavoritesRegistry {
    collections: RwLock<HashMap<i64, SharedFavorites>>,
}

impl FavoritesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coleção viva do usuário, se existir. Não cria entradas.
    pub async fn get(&self, user_id: i64) -> Option<SharedFavorites> {
        self.collections.read().await.get(&user_id).map(Arc::clone)
    }

    /// Busca a coleção do usuário, criando uma vazia no primeiro uso.
    /// Only login and add call this; read paths go through `get`.
    pub async fn collection(&self, user_id: i64) -> SharedFavorites {
        if let Some(existing) = self.collections.read().await.get(&user_id) {
            return Arc::clone(existing);
        }

        let mut collections = self.collections.write().await;
        Arc::clone(
            collections
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(FavoritesCollection::new(user_id)))),
        )
    }

    /// Descarta a coleção viva (logout ou conta removida)
    pub async fn discard(&self, user_id: i64) {
        self.collections.write().await.remove(&user_id);
    }

    /// Número de usuários com coleção viva
    pub async fn len(&self) -> usize {
        self.collections.read().await.len()
    }
}
