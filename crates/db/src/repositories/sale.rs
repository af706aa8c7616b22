use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use bazar_core::domain::product::ProductId;
use bazar_core::domain::sale::{Sale, SaleId};

use super::{RepositoryError, SaleRepository};
use crate::DbPool;

pub struct SqlSaleRepository {
    pool: DbPool,
}

impl SqlSaleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_sale(row: &sqlx::sqlite::SqliteRow) -> Result<Sale, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let product_id: i64 =
        row.try_get("product_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let quantity: i64 =
        row.try_get("quantity").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let total_text: String =
        row.try_get("total").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let date_text: String =
        row.try_get("date").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let total = total_text.parse::<Decimal>().map_err(|e| {
        RepositoryError::Decode(format!("total `{total_text}` is not a decimal: {e}"))
    })?;
    let date = DateTime::parse_from_rfc3339(&date_text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("date `{date_text}` is not rfc3339: {e}")))?;

    Ok(Sale { id: SaleId(id), product_id: ProductId(product_id), quantity, date, total })
}

#[async_trait::async_trait]
impl SaleRepository for SqlSaleRepository {
    async fn list(&self) -> Result<Vec<Sale>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> =
            sqlx::query("SELECT id, product_id, quantity, total, date FROM sale")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_sale).collect()
    }
}
