//! Request/response DTOs, JSON:API envelope.

use serde::{Deserialize, Serialize};

use storeflow_core::ProductId;
use storeflow_inventory::{StockPage, StockRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct InventoryRequest {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseInventoryRequest {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct FindParams {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(rename = "page[number]", default)]
    pub page_number: i64,
    #[serde(rename = "page[size]", default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

// -------------------------
// JSON:API envelope
// -------------------------

#[derive(Debug, Serialize)]
pub struct JsonApiData<T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: T,
}

#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T> {
    pub data: JsonApiData<T>,
}

#[derive(Debug, Serialize)]
pub struct JsonApiListResponse<T> {
    pub data: Vec<JsonApiData<T>>,
    pub meta: JsonApiPaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct JsonApiPaginationMeta {
    #[serde(rename = "pageNumber")]
    pub page_number: u64,
    #[serde(rename = "pageSize")]
    pub page_size: u64,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct JsonApiError {
    pub status: String,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct JsonApiErrorResponse {
    pub errors: Vec<JsonApiError>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: i64,
}

pub fn inventory_resource(record: &StockRecord) -> JsonApiData<InventoryResponse> {
    JsonApiData {
        kind: "inventories",
        id: record.product_id.to_string(),
        attributes: InventoryResponse {
            product_id: record.product_id,
            quantity: record.quantity,
        },
    }
}

pub fn inventory_response(record: &StockRecord) -> JsonApiResponse<InventoryResponse> {
    JsonApiResponse {
        data: inventory_resource(record),
    }
}

pub fn inventory_list_response(page: &StockPage) -> JsonApiListResponse<InventoryResponse> {
    JsonApiListResponse {
        data: page.records.iter().map(inventory_resource).collect(),
        meta: JsonApiPaginationMeta {
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        },
    }
}
