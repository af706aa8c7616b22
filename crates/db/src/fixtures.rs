use crate::repositories::RepositoryError;
use crate::DbPool;

#[derive(Clone, Copy, Debug)]
pub struct SeedProduct {
    pub catalog_id: i64,
    pub title: &'static str,
    pub price: &'static str,
    pub stock: i64,
}

/// Deterministic starter catalog used by `bazar seed` and smoke checks.
pub const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct { catalog_id: 1, title: "Wireless Mouse", price: "19.99", stock: 42 },
    SeedProduct { catalog_id: 2, title: "Mechanical Keyboard", price: "89.50", stock: 18 },
    SeedProduct { catalog_id: 3, title: "USB-C Hub", price: "34.00", stock: 25 },
    SeedProduct { catalog_id: 4, title: "Laptop Stand", price: "49.90", stock: 12 },
    SeedProduct { catalog_id: 5, title: "Noise Cancelling Headphones", price: "129.00", stock: 9 },
    SeedProduct { catalog_id: 6, title: "Webcam Cover 3-pack", price: "6.75", stock: 120 },
];

#[derive(Clone, Copy, Debug)]
pub struct SeedResult {
    pub products_seeded: usize,
}

pub struct CatalogSeed;

impl CatalogSeed {
    /// Upserts the starter catalog. Reseeding resets titles, prices, and stock
    /// to the canonical values without touching recorded sales.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        for product in SEED_PRODUCTS {
            sqlx::query(
                "INSERT INTO product (catalog_id, title, price, stock) VALUES (?, ?, ?, ?)
                 ON CONFLICT(catalog_id) DO UPDATE SET
                     title = excluded.title,
                     price = excluded.price,
                     stock = excluded.stock",
            )
            .bind(product.catalog_id)
            .bind(product.title)
            .bind(product.price)
            .bind(product.stock)
            .execute(pool)
            .await?;
        }

        Ok(SeedResult { products_seeded: SEED_PRODUCTS.len() })
    }

    /// Confirms every canonical product is present with its canonical title.
    pub async fn verify(pool: &DbPool) -> Result<bool, RepositoryError> {
        for product in SEED_PRODUCTS {
            let found: Option<String> =
                sqlx::query_scalar("SELECT title FROM product WHERE catalog_id = ?")
                    .bind(product.catalog_id)
                    .fetch_optional(pool)
                    .await?;

            if found.as_deref() != Some(product.title) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogSeed, SEED_PRODUCTS};
    use crate::{connect_with_settings, migrations};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn load_seeds_the_canonical_catalog() {
        let pool = setup().await;

        assert!(!CatalogSeed::verify(&pool).await.expect("verify before"), "empty store");

        let result = CatalogSeed::load(&pool).await.expect("load");
        assert_eq!(result.products_seeded, SEED_PRODUCTS.len());
        assert!(CatalogSeed::verify(&pool).await.expect("verify after"));
    }

    #[tokio::test]
    async fn reseeding_restores_canonical_values_without_duplicates() {
        let pool = setup().await;
        CatalogSeed::load(&pool).await.expect("first load");

        sqlx::query("UPDATE product SET stock = 0, title = 'Tampered' WHERE catalog_id = 1")
            .execute(&pool)
            .await
            .expect("tamper");

        CatalogSeed::load(&pool).await.expect("second load");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, SEED_PRODUCTS.len() as i64);

        let stock: i64 = sqlx::query_scalar("SELECT stock FROM product WHERE catalog_id = 1")
            .fetch_one(&pool)
            .await
            .expect("stock");
        assert_eq!(stock, 42);
    }
}
