pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod purchase;
pub mod repositories;

pub use connection::{connect, connect_with_settings, DbPool};
pub use fixtures::{CatalogSeed, SeedResult};
pub use purchase::{PurchaseError, SqlPurchaseService};
