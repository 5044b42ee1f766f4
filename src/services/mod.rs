pub mod auth_service;
pub mod catalog_service;
pub mod favorites_registry;
pub mod session_sync;
