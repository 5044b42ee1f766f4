pub mod session_store;
pub mod user_store;

pub use session_store::*;
pub use user_store::*;

use crate::utils::error::AppError;
use mongodb::{Client, Collection, Database};

pub const SESSIONS_COLLECTION: &str = "sessions";
pub const USERS_COLLECTION: &str = "users";
pub const COUNTERS_COLLECTION: &str = "counters";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;
        
        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));  // 5min idle
        
        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        
        // Database name from the URI path, or default
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| "scholarship_finder".to_string());
        
        let client = Client::with_options(client_options)?;
        log::info!("📊 Using database: {}", db_name);
        
        let db = client.database(&db_name);
        
        // Test connection
        db.list_collection_names().await?;
        
        let mongodb = Self { db };
        
        mongodb.ensure_indexes().await?;
        
        Ok(mongodb)
    }
    
    /// Cria os índices únicos que garantem uma sessão e uma conta por usuário
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;
        
        log::info!("🔧 Creating database indexes...");
        
        let unique = || IndexOptions::builder().unique(true).build();
        
        // sessions(user_id) UNIQUE - no máximo uma sessão por usuário
        let sessions = self.collection::<mongodb::bson::Document>(SESSIONS_COLLECTION);
        let sessions_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(unique())
            .build();
        sessions.create_index(sessions_index).await?;
        log::info!("   ✅ Index ready: sessions(user_id) unique");
        
        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);
        
        let users_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(unique())
            .build();
        users.create_index(users_id_index).await?;
        log::info!("   ✅ Index ready: users(user_id) unique");
        
        let users_name_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(unique())
            .build();
        users.create_index(users_name_index).await?;
        log::info!("   ✅ Index ready: users(username) unique");
        
        log::info!("✅ Database indexes ready");
        
        Ok(())
    }
    
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// E11000: violação de índice único
pub(crate) fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}
