use crate::{
    services::{catalog_service::CatalogProvider, favorites_registry::FavoritesRegistry},
    store::{SessionStore, UserStore},
};
use std::sync::Arc;

/// Dependências montadas em `main` e injetadas via `web::Data`
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub users: Arc<dyn UserStore>,
    pub catalog: Arc<dyn CatalogProvider>,
    pub favorites: FavoritesRegistry,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogProvider>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            sessions,
            users,
            catalog,
            favorites: FavoritesRegistry::new(),
            bcrypt_cost,
        }
    }
}
