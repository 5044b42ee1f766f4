use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scholarship Service API",
        version = "1.0.0",
        description = "Scholarship discovery backend. \n\n**Features:**\n- Scholarship catalog backed by a Notion database, with filters and deadline sorting\n- Per-user favorites with de-duplication by (university, scholarship_name)\n- Login/logout that restores and persists favorites sessions\n- Basic account creation and deletion",
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::create_user,
        crate::api::users::delete_user,

        // Sessions
        crate::api::sessions::login,
        crate::api::sessions::logout,

        // Scholarships
        crate::api::scholarships::get_all_scholarships,
        crate::api::scholarships::get_scholarships_by_type,
        crate::api::scholarships::get_scholarships_by_country,
        crate::api::scholarships::get_scholarships_by_degree_level,
        crate::api::scholarships::get_scholarships_by_gpa,
        crate::api::scholarships::get_scholarships_by_deadline,

        // Favorites
        crate::api::favorites::get_user_favorites,
        crate::api::favorites::add_to_favorites,
        crate::api::favorites::remove_from_favorites,
        crate::api::favorites::clear_favorites,
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::health::HealthResponse,
            crate::models::ScholarshipRecord,
            crate::models::ScholarshipPayload,
            crate::models::UserInfo,
            crate::services::auth_service::CredentialsRequest,
            crate::services::auth_service::DeleteUserRequest,
            crate::api::sessions::LoginResponse,
            crate::api::sessions::LogoutRequest,
            crate::api::scholarships::ScholarshipsResponse,
            crate::api::favorites::AddFavoriteRequest,
            crate::api::favorites::RemoveFavoriteRequest,
            crate::api::favorites::ClearFavoritesRequest,
            crate::api::favorites::FavoritesResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check and request counters."),
        (name = "Users", description = "Account creation and deletion."),
        (name = "Sessions", description = "Login restores persisted favorites; logout saves them and clears the live list."),
        (name = "Scholarships", description = "Scholarship catalog from Notion with filters and sorting."),
        (name = "Favorites", description = "Per-user favorites list. Duplicates and missing entries are reported, not errors."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_favorites_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/favorites/add"));
        assert!(paths.contains_key("/api/favorites/{user_id}"));
        assert!(paths.contains_key("/api/logout"));
    }
}
