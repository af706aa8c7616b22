//! Sales routes.
//!
//! - `GET  /api/sales` — list recorded sales
//! - `POST /api/sales` — purchase a quantity of a product, recording a sale

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use bazar_core::checkout::CheckoutError;
use bazar_core::domain::product::ProductId;
use bazar_core::domain::sale::Sale;
use bazar_db::repositories::{SaleRepository, SqlSaleRepository};
use bazar_db::{DbPool, PurchaseError, SqlPurchaseService};

use crate::respond::{bad_request, not_found, store_failure, ApiFailure};

#[derive(Clone)]
pub struct SalesState {
    db_pool: DbPool,
}

/// Typed purchase request; malformed bodies are rejected by the extractor
/// before the transaction ever runs.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct SaleCreated {
    pub message: String,
    pub sale: Sale,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new()
        .route("/api/sales", get(list_sales).post(create_sale))
        .with_state(SalesState { db_pool })
}

pub async fn list_sales(
    State(state): State<SalesState>,
) -> Result<Json<Vec<Sale>>, ApiFailure> {
    let repo = SqlSaleRepository::new(state.db_pool.clone());

    match repo.list().await {
        Ok(sales) => Ok(Json(sales)),
        Err(err) => {
            error!(
                event_name = "sales.list.store_failure",
                error = %err,
                "failed to list sales"
            );
            Err(store_failure("Failed to retrieve sales", err))
        }
    }
}

pub async fn create_sale(
    State(state): State<SalesState>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleCreated>), ApiFailure> {
    let service = SqlPurchaseService::new(state.db_pool.clone());

    match service.purchase(ProductId(request.product_id), request.quantity).await {
        Ok(sale) => {
            info!(
                event_name = "sales.purchase.recorded",
                product_id = %sale.product_id,
                quantity = sale.quantity,
                sale_id = sale.id.0,
                "purchase recorded"
            );
            Ok((
                StatusCode::CREATED,
                Json(SaleCreated { message: "Purchase completed successfully".to_string(), sale }),
            ))
        }
        Err(PurchaseError::ProductNotFound(product_id)) => {
            warn!(
                event_name = "sales.purchase.unknown_product",
                product_id = %product_id,
                "purchase rejected"
            );
            Err(not_found("Product not found"))
        }
        Err(PurchaseError::Rejected(rule)) => {
            warn!(
                event_name = "sales.purchase.rejected",
                reason = %rule,
                "purchase rejected"
            );
            Err(bad_request(rejection_message(&rule)))
        }
        Err(PurchaseError::Store(err)) => {
            error!(
                event_name = "sales.purchase.store_failure",
                error = %err,
                "failed to record the purchase"
            );
            Err(store_failure("Failed to complete the purchase", err))
        }
    }
}

fn rejection_message(rule: &CheckoutError) -> &'static str {
    match rule {
        CheckoutError::InvalidQuantity { .. } => "Quantity must be a positive integer",
        CheckoutError::InsufficientStock { .. } => "Insufficient stock",
    }
}
