use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockflow_products::{InventoryView, aggregate_by_category, compute_stats, rank_alerts};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(overview))
        .route("/stats", get(stats))
        .route("/categories", get(categories))
        .route("/alerts", get(alerts))
}

/// Filtered listing plus the whole-catalog stats, category totals and alerts.
pub async fn overview(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::InventoryQuery>,
) -> axum::response::Response {
    let filter = match query.to_filter() {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let products = match services.snapshot().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let view = InventoryView::compute(&products, filter, services.config().alert_limit);
    (StatusCode::OK, Json(dto::InventoryResponse::from(view))).into_response()
}

pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.snapshot().await {
        Ok(products) => (StatusCode::OK, Json(compute_stats(&products))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn categories(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.snapshot().await {
        Ok(products) => {
            let items = dto::category_totals(aggregate_by_category(&products));
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::AlertsQuery>,
) -> axum::response::Response {
    let limit = query.limit.unwrap_or(services.config().alert_limit);

    match services.snapshot().await {
        Ok(products) => {
            let items = rank_alerts(&products, limit);
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
