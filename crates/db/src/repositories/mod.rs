use async_trait::async_trait;
use thiserror::Error;

use bazar_core::domain::product::{Product, ProductId};
use bazar_core::domain::sale::Sale;

pub mod catalog;
pub mod sale;

pub use catalog::SqlCatalogRepository;
pub use sale::SqlSaleRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read side of the product catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists products, optionally narrowed to titles containing `filter` as a
    /// case-insensitive substring. An empty result is a successful outcome,
    /// distinct from a store failure.
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_catalog_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}

/// Read side of the sales ledger. Writes happen only through the purchase
/// transaction.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Sale>, RepositoryError>;
}
