use actix_web::{web, HttpResponse};
use std::sync::atomic::{AtomicU64, Ordering};
use crate::state::AppState;

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Texto no formato de exposição do Prometheus
pub fn render(live_collections: usize) -> String {
    let mut out = String::new();
    let mut metric = |name: &str, kind: &str, help: &str, value: u64| {
        out.push_str(&format!("# HELP {name} {help}\n# TYPE {name} {kind}\n{name} {value}\n"));
    };

    metric(
        "scholarship_http_requests_total",
        "counter",
        "HTTP requests handled",
        REQUEST_COUNT.load(Ordering::Relaxed),
    );
    metric(
        "scholarship_http_errors_total",
        "counter",
        "HTTP requests that ended in a 5xx or a service error",
        ERROR_COUNT.load(Ordering::Relaxed),
    );
    metric(
        "scholarship_live_favorites_collections",
        "gauge",
        "Users with an in-memory favorites collection",
        live_collections as u64,
    );
    out
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text metrics", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics(state: web::Data<AppState>) -> HttpResponse {
    let live = state.favorites.len().await;

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render(live))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_reports_live_collections_gauge() {
        let text = render(3);
        assert!(text.contains("# TYPE scholarship_live_favorites_collections gauge\n"));
        assert!(text.contains("\nscholarship_live_favorites_collections 3\n"));
        assert!(text.contains("# TYPE scholarship_http_requests_total counter\n"));
    }
}
