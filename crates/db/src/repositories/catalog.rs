use rust_decimal::Decimal;
use sqlx::Row;

use bazar_core::domain::product::{Product, ProductId};

use super::{CatalogRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCatalogRepository {
    pool: DbPool,
}

impl SqlCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Lowercases the filter and escapes LIKE metacharacters so it always matches
/// as a literal substring.
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for ch in filter.to_ascii_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let catalog_id: i64 =
        row.try_get("catalog_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let title: String = row.try_get("title").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_text: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let stock: i64 = row.try_get("stock").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = price_text.parse::<Decimal>().map_err(|e| {
        RepositoryError::Decode(format!("price `{price_text}` is not a decimal: {e}"))
    })?;

    Ok(Product { id: ProductId(catalog_id), title, price, stock })
}

#[async_trait::async_trait]
impl CatalogRepository for SqlCatalogRepository {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = match filter {
            Some(filter) => {
                sqlx::query(
                    "SELECT catalog_id, title, price, stock FROM product
                     WHERE LOWER(title) LIKE ? ESCAPE '\\'",
                )
                .bind(like_pattern(filter))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT catalog_id, title, price, stock FROM product")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.iter().map(row_to_product).collect()
    }

    async fn find_by_catalog_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT catalog_id, title, price, stock FROM product WHERE catalog_id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref row) => Ok(Some(row_to_product(row)?)),
            None => Ok(None),
        }
    }
}
