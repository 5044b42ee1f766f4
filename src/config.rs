use crate::{services::catalog_service::NOTION_API_BASE, utils::error::AppError};
use std::env;

// Limites aceitos pelo crate bcrypt
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDB,
    Memory,
}

/// Configuração lida do ambiente (`.env` via dotenv)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub notion_api_key: String,
    pub notion_database_id: String,
    pub notion_api_base: String,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "5000")
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("PORT is not a valid port: {}", e)))?;

        let storage_backend = match var("STORAGE_BACKEND", "mongodb").to_lowercase().as_str() {
            "mongodb" | "mongo" => StorageBackend::MongoDB,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(AppError::ConfigError(format!(
                    "STORAGE_BACKEND must be 'mongodb' or 'memory', got '{}'",
                    other
                )))
            }
        };

        let database_url = lookup("DATABASE_URL");
        if storage_backend == StorageBackend::MongoDB && database_url.is_none() {
            return Err(AppError::ConfigError(
                "DATABASE_URL must be set when STORAGE_BACKEND=mongodb".to_string(),
            ));
        }

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| AppError::ConfigError(format!("BCRYPT_COST is not a number: {}", e)))?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&bcrypt_cost) {
            return Err(AppError::ConfigError(format!(
                "BCRYPT_COST must be between {} and {}, got {}",
                BCRYPT_MIN_COST, BCRYPT_MAX_COST, bcrypt_cost
            )));
        }

        let cors_origins = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            storage_backend,
            database_url,
            notion_api_key: var("NOTION_API_KEY", ""),
            notion_database_id: var("NOTION_DATABASE_ID", ""),
            notion_api_base: var("NOTION_API_BASE", NOTION_API_BASE),
            cors_origins,
            bcrypt_cost,
        })
    }
}
