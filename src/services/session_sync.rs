// ==================== SESSION SYNC ====================
// Login/logout: move favoritos entre a SessionStore e a coleção em memória.
// O logout faz update condicional sem compare-and-set: dois logouts
// concorrentes do mesmo usuário resultam em "last writer wins".

use crate::{models::FavoritesCollection, store::SessionStore, utils::error::AppError};

/// Carrega a sessão persistida em `favorites`, ou cria uma sessão vazia.
///
/// Stored entries go through `FavoritesCollection::add`, so a duplicate that
/// made it into storage collapses instead of propagating. When no session
/// exists the collection is left as passed in.
pub async fn login_user(
    store: &dyn SessionStore,
    user_id: i64,
    favorites: &mut FavoritesCollection,
) -> Result<(), AppError> {
    log::info!("🔐 Attempting to log in user with ID {}", user_id);

    match store.find(user_id).await? {
        Some(stored) => {
            log::info!("📥 Session found for user ID {}. Loading {} favorites", user_id, stored.len());
            favorites.clear();
            for scholarship in stored {
                log::debug!("Preparing favorite scholarship: {}", scholarship.identity_key());
                favorites.add(scholarship);
            }
            log::info!("✅ Favorites successfully loaded for user ID {}", user_id);
        }
        None => {
            log::info!("🆕 No session found for user ID {}. Creating a new empty session", user_id);
            store.insert(user_id, Vec::new()).await?;
            log::info!("✅ New session created for user ID {}", user_id);
        }
    }

    Ok(())
}

/// Persiste `favorites` na sessão do usuário e limpa a coleção.
///
/// Fails with `AppError::SessionNotFound` when no session matched; in that
/// case nothing is created and `favorites` keeps its contents.
pub async fn logout_user(
    store: &dyn SessionStore,
    user_id: i64,
    favorites: &mut FavoritesCollection,
) -> Result<(), AppError> {
    log::info!("🚪 Attempting to log out user with ID {}", user_id);

    let snapshot = favorites.list();
    log::debug!("Current favorites for user ID {}: {:?}", user_id, snapshot);

    let matched = store.update(user_id, snapshot).await?;

    if matched == 0 {
        log::error!("❌ No session found for user ID {}. Logout failed", user_id);
        return Err(AppError::SessionNotFound(user_id));
    }

    log::info!("💾 Favorites saved for user ID {}. Clearing in-memory favorites", user_id);
    favorites.clear();

    Ok(())
}
