use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::{dto, errors, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_or_update).get(find_by_product_id))
        .route("/page", get(find_page))
        .route("/purchase", post(purchase))
}

pub async fn create_or_update(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::InventoryRequest>,
) -> axum::response::Response {
    match services
        .inventory()
        .create_or_update(body.product_id, body.quantity)
        .await
    {
        Ok(record) => {
            (StatusCode::CREATED, Json(dto::inventory_response(&record))).into_response()
        }
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn find_by_product_id(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::FindParams>,
) -> axum::response::Response {
    match services
        .inventory()
        .find_by_product_id(params.product_id)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(dto::inventory_response(&record))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn find_page(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::PageParams>,
) -> axum::response::Response {
    match services
        .inventory()
        .find_page(params.page_number, params.page_size)
        .await
    {
        Ok(page) => (StatusCode::OK, Json(dto::inventory_list_response(&page))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PurchaseInventoryRequest>,
) -> axum::response::Response {
    match services
        .inventory()
        .purchase(body.product_id, body.quantity)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(dto::inventory_response(&record))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
