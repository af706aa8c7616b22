//! The purchase transaction: validate the requested quantity against current
//! catalog state, fix the total, persist the sale, and decrement stock.

use chrono::Utc;
use thiserror::Error;

use bazar_core::checkout::{self, CheckoutError};
use bazar_core::domain::product::ProductId;
use bazar_core::domain::sale::{Sale, SaleId};

use crate::repositories::catalog::row_to_product;
use crate::repositories::RepositoryError;
use crate::DbPool;

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error(transparent)]
    Rejected(#[from] CheckoutError),
    #[error(transparent)]
    Store(RepositoryError),
}

impl From<RepositoryError> for PurchaseError {
    fn from(error: RepositoryError) -> Self {
        Self::Store(error)
    }
}

impl From<sqlx::Error> for PurchaseError {
    fn from(error: sqlx::Error) -> Self {
        Self::Store(RepositoryError::Database(error))
    }
}

pub struct SqlPurchaseService {
    pool: DbPool,
}

impl SqlPurchaseService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Converts a requested quantity into a persisted sale and a stock
    /// decrement, returning the sale with its store-assigned id.
    ///
    /// The whole sequence runs in one transaction and the decrement is guarded
    /// by `stock >= quantity`, so stock cannot go negative when two purchases
    /// of the same product race past the initial check, and a sale row cannot
    /// outlive a failed decrement.
    pub async fn purchase(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Sale, PurchaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT catalog_id, title, price, stock FROM product WHERE catalog_id = ?",
        )
        .bind(product_id.0)
        .fetch_optional(&mut *tx)
        .await?;

        let product = match row {
            Some(ref row) => row_to_product(row)?,
            None => return Err(PurchaseError::ProductNotFound(product_id)),
        };

        let ticket = checkout::price_purchase(&product, quantity)?;

        let decremented = sqlx::query(
            "UPDATE product SET stock = stock - ? WHERE catalog_id = ? AND stock >= ?",
        )
        .bind(quantity)
        .bind(product_id.0)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;
        if decremented.rows_affected() == 0 {
            // A concurrent purchase drained the stock between our read and the
            // guarded decrement; `available` reflects the state we validated.
            return Err(CheckoutError::InsufficientStock {
                available: product.stock,
                requested: quantity,
            }
            .into());
        }

        let date = Utc::now();
        let inserted =
            sqlx::query("INSERT INTO sale (product_id, quantity, total, date) VALUES (?, ?, ?, ?)")
                .bind(product_id.0)
                .bind(quantity)
                .bind(ticket.total.to_string())
                .bind(date.to_rfc3339())
                .execute(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Sale {
            id: SaleId(inserted.last_insert_rowid()),
            product_id,
            quantity,
            date,
            total: ticket.total,
        })
    }
}
