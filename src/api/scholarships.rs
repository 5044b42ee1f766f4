use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;
use crate::{
    models::ScholarshipRecord,
    services::catalog_service,
    state::AppState,
    utils::error::AppError,
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScholarshipsResponse {
    pub status: String,
    pub count: usize,
    pub scholarships: Vec<ScholarshipRecord>,
}

fn ok(scholarships: Vec<ScholarshipRecord>) -> HttpResponse {
    HttpResponse::Ok().json(ScholarshipsResponse {
        status: "success".to_string(),
        count: scholarships.len(),
        scholarships,
    })
}

/// Busca o catálogo e aplica `select`; erro do provider vira 500
async fn respond_with<F>(state: &AppState, route: &str, select: F) -> HttpResponse
where
    F: FnOnce(Vec<ScholarshipRecord>) -> Vec<ScholarshipRecord>,
{
    log::info!("📚 GET {}", route);

    match state.catalog.fetch_all().await {
        Ok(all) => {
            let selected = select(all);
            log::info!("✅ {} scholarships for {}", selected.len(), route);
            ok(selected)
        }
        Err(e) => {
            log::error!("❌ Error retrieving scholarships for {}: {}", route, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/scholarships",
    tag = "Scholarships",
    responses(
        (status = 200, description = "All available scholarships", body = ScholarshipsResponse),
        (status = 500, description = "Catalog unavailable")
    )
)]
pub async fn get_all_scholarships(state: web::Data<AppState>) -> HttpResponse {
    respond_with(&state, "/scholarships", |all| all).await
}

#[utoipa::path(
    get,
    path = "/api/scholarships/type/{scholarship_type}",
    tag = "Scholarships",
    params(("scholarship_type" = String, Path, description = "e.g. Merit-based")),
    responses((status = 200, description = "Matching scholarships", body = ScholarshipsResponse))
)]
pub async fn get_scholarships_by_type(
    state: web::Data<AppState>,
    scholarship_type: web::Path<String>,
) -> HttpResponse {
    let scholarship_type = scholarship_type.into_inner();
    respond_with(&state, &format!("/scholarships/type/{}", scholarship_type), |all| {
        catalog_service::filter_by_type(&all, &scholarship_type)
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/scholarships/country/{country}",
    tag = "Scholarships",
    params(("country" = String, Path, description = "Country name")),
    responses((status = 200, description = "Matching scholarships", body = ScholarshipsResponse))
)]
pub async fn get_scholarships_by_country(
    state: web::Data<AppState>,
    country: web::Path<String>,
) -> HttpResponse {
    let country = country.into_inner();
    respond_with(&state, &format!("/scholarships/country/{}", country), |all| {
        catalog_service::filter_by_country(&all, &country)
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/scholarships/degree/{degree_level}",
    tag = "Scholarships",
    params(("degree_level" = String, Path, description = "e.g. Undergraduate")),
    responses((status = 200, description = "Matching scholarships", body = ScholarshipsResponse))
)]
pub async fn get_scholarships_by_degree_level(
    state: web::Data<AppState>,
    degree_level: web::Path<String>,
) -> HttpResponse {
    let degree_level = degree_level.into_inner();
    respond_with(&state, &format!("/scholarships/degree/{}", degree_level), |all| {
        catalog_service::filter_by_degree_level(&all, &degree_level)
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/scholarships/gpa/{gpa}",
    tag = "Scholarships",
    params(("gpa" = f64, Path, description = "Student GPA")),
    responses(
        (status = 200, description = "Matching scholarships", body = ScholarshipsResponse),
        (status = 400, description = "GPA is not a non-negative number")
    )
)]
pub async fn get_scholarships_by_gpa(
    state: web::Data<AppState>,
    gpa: web::Path<String>,
) -> HttpResponse {
    let gpa = match gpa.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            return AppError::InvalidRequest(format!("Invalid GPA: {}", gpa.as_str()))
                .error_response()
        }
    };

    respond_with(&state, &format!("/scholarships/gpa/{}", gpa), |all| {
        catalog_service::filter_by_min_gpa(&all, gpa)
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/scholarships/sort/deadline",
    tag = "Scholarships",
    responses((status = 200, description = "Sorted by deadline, earliest first", body = ScholarshipsResponse))
)]
pub async fn get_scholarships_by_deadline(state: web::Data<AppState>) -> HttpResponse {
    respond_with(&state, "/scholarships/sort/deadline", catalog_service::sort_by_deadline).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api,
        services::catalog_service::CatalogProvider,
        store::{InMemorySessionStore, InMemoryUserStore},
    };
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    struct StaticCatalog(Vec<ScholarshipRecord>);

    #[async_trait]
    impl CatalogProvider for StaticCatalog {
        async fn fetch_all(&self) -> Result<Vec<ScholarshipRecord>, AppError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl CatalogProvider for BrokenCatalog {
        async fn fetch_all(&self) -> Result<Vec<ScholarshipRecord>, AppError> {
            Err(AppError::CatalogError("Notion unreachable".to_string()))
        }
    }

    fn record(name: &str, kind: &str, deadline: &str, gpa: Option<f64>) -> ScholarshipRecord {
        ScholarshipRecord {
            university: "MIT".into(),
            scholarship_name: name.into(),
            scholarship_type: kind.into(),
            degree_level: "Undergraduate".into(),
            country: "USA".into(),
            deadline: deadline.into(),
            min_gpa: gpa,
            major: vec![],
        }
    }

    fn state_with(catalog: Arc<dyn CatalogProvider>) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryUserStore::new()),
            catalog,
            4,
        ))
    }

    #[actix_rt::test]
    async fn test_type_filter_and_deadline_sort() {
        let catalog = StaticCatalog(vec![
            record("STEM", "Merit-based", "2024-03-10", Some(3.7)),
            record("Need", "Need-based", "2024-02-20", None),
            record("Merit", "Merit-based", "2024-01-15", Some(3.5)),
        ]);
        let app = test::init_service(
            App::new().app_data(state_with(Arc::new(catalog))).configure(api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/scholarships/type/Merit-based").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["count"], 2);

        let req = test::TestRequest::get().uri("/api/scholarships/sort/deadline").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["scholarships"][0]["scholarship_name"], "Merit");
        assert_eq!(resp["scholarships"][2]["scholarship_name"], "STEM");

        let req = test::TestRequest::get().uri("/api/scholarships/gpa/3.6").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["count"], 1);

        let req = test::TestRequest::get().uri("/api/scholarships/gpa/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_catalog_failure_is_internal_error() {
        let app = test::init_service(
            App::new().app_data(state_with(Arc::new(BrokenCatalog))).configure(api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/scholarships").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
