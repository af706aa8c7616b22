//! Catalog browsing routes.
//!
//! - `GET /api/items`       — list products, optional `?q=` title filter
//! - `GET /api/items/{id}`  — fetch one product by its catalog id

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use bazar_core::domain::product::{Product, ProductId};
use bazar_db::repositories::{CatalogRepository, SqlCatalogRepository};
use bazar_db::DbPool;

use crate::respond::{not_found, store_failure, ApiFailure};

#[derive(Clone)]
pub struct CatalogState {
    db_pool: DbPool,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListItemsQuery {
    pub q: Option<String>,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new()
        .route("/api/items", get(list_items))
        .route("/api/items/{id}", get(get_item))
        .with_state(CatalogState { db_pool })
}

/// Blank filters behave like no filter at all.
fn effective_filter(query: &ListItemsQuery) -> Option<&str> {
    query.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
}

pub async fn list_items(
    Query(query): Query<ListItemsQuery>,
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Product>>, ApiFailure> {
    let repo = SqlCatalogRepository::new(state.db_pool.clone());

    match repo.list(effective_filter(&query)).await {
        Ok(products) => Ok(Json(products)),
        Err(err) => {
            error!(
                event_name = "catalog.list.store_failure",
                error = %err,
                "failed to list products"
            );
            Err(store_failure("Failed to retrieve products", err))
        }
    }
}

/// The id segment is parsed here rather than by the extractor so non-numeric
/// input degrades to Not-Found instead of surfacing as a plumbing error.
pub async fn get_item(
    Path(id): Path<String>,
    State(state): State<CatalogState>,
) -> Result<Json<Product>, ApiFailure> {
    let Ok(catalog_id) = id.trim().parse::<i64>() else {
        return Err(not_found("Product not found"));
    };

    let repo = SqlCatalogRepository::new(state.db_pool.clone());
    match repo.find_by_catalog_id(ProductId(catalog_id)).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(not_found("Product not found")),
        Err(err) => {
            error!(
                event_name = "catalog.get.store_failure",
                error = %err,
                "failed to fetch product"
            );
            Err(store_failure("Failed to retrieve the product", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::Json;
    use rust_decimal::Decimal;

    use bazar_db::{connect_with_settings, migrations};

    use super::{get_item, list_items, CatalogState, ListItemsQuery};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        for (catalog_id, title, price, stock) in [
            (1_i64, "Widget", "10", 5_i64),
            (2, "Widget Deluxe", "25.50", 3),
            (3, "Gizmo", "7", 0),
        ] {
            sqlx::query("INSERT INTO product (catalog_id, title, price, stock) VALUES (?, ?, ?, ?)")
                .bind(catalog_id)
                .bind(title)
                .bind(price)
                .bind(stock)
                .execute(&pool)
                .await
                .expect("seed product");
        }

        pool
    }

    fn state(pool: sqlx::SqlitePool) -> State<CatalogState> {
        State(CatalogState { db_pool: pool })
    }

    #[tokio::test]
    async fn list_without_filter_returns_the_whole_catalog() {
        let pool = setup().await;

        let Json(products) = list_items(Query(ListItemsQuery::default()), state(pool))
            .await
            .expect("should succeed");

        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn list_filters_by_case_insensitive_title_substring() {
        let pool = setup().await;

        let Json(products) =
            list_items(Query(ListItemsQuery { q: Some("widget".to_string()) }), state(pool))
                .await
                .expect("should succeed");

        let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Widget", "Widget Deluxe"]);
    }

    #[tokio::test]
    async fn blank_filter_lists_everything() {
        let pool = setup().await;

        let Json(products) =
            list_items(Query(ListItemsQuery { q: Some("   ".to_string()) }), state(pool))
                .await
                .expect("should succeed");

        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn get_item_returns_the_product_by_catalog_id() {
        let pool = setup().await;

        let Json(product) =
            get_item(Path("2".to_string()), state(pool)).await.expect("should succeed");

        assert_eq!(product.title, "Widget Deluxe");
        assert_eq!(product.price, Decimal::new(2550, 2));
        assert_eq!(product.stock, 3);
    }

    #[tokio::test]
    async fn get_unknown_item_is_not_found() {
        let pool = setup().await;

        let (status, body) =
            get_item(Path("999".to_string()), state(pool)).await.expect_err("should fail");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0.message, "Product not found");
    }

    #[tokio::test]
    async fn non_numeric_id_degrades_to_not_found() {
        let pool = setup().await;

        let (status, _) =
            get_item(Path("abc".to_string()), state(pool)).await.expect_err("should fail");

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
