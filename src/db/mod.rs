//! Persistence for the `producto` table.
//!
//! [`ProductRepository`] is the seam the service layer talks to. Postgres backs
//! it in production; [`memory::InMemoryProductRepository`] backs it when no
//! database is configured and in tests.

pub mod memory;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{Product, ProductPayload};

pub use memory::InMemoryProductRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every row, ascending by id.
    async fn find_all(&self) -> AppResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Insert a new row; the store assigns the id.
    async fn insert(&self, payload: ProductPayload) -> AppResult<Product>;

    /// Insert-or-update keyed on `product.id`.
    async fn save(&self, product: Product) -> AppResult<Product>;

    /// Deleting an id that does not exist is a no-op.
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
}

// ── Postgres ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id_producto, descripcion, precio, existencia
             FROM producto ORDER BY id_producto ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id_producto, descripcion, precio, existencia
             FROM producto WHERE id_producto = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert(&self, payload: ProductPayload) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO producto (descripcion, precio, existencia)
            VALUES ($1, $2, $3)
            RETURNING id_producto, descripcion, precio, existencia
            "#,
        )
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        let saved = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO producto (id_producto, descripcion, precio, existencia)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id_producto) DO UPDATE
            SET descripcion = EXCLUDED.descripcion,
                precio      = EXCLUDED.precio,
                existencia  = EXCLUDED.existencia
            RETURNING id_producto, descripcion, precio, existencia
            "#,
        )
        .bind(product.id)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM producto WHERE id_producto = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
