use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::db::ProductRepository;
use crate::error::AppResult;
use crate::models::{Product, ProductPayload};

/// What the HTTP layer needs from the product store. Absence is reported as
/// `None`; turning it into a 404 is the caller's decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Product>>;

    async fn create(&self, payload: ProductPayload) -> AppResult<Product>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Insert-or-update keyed on `product.id`.
    async fn save(&self, product: Product) -> AppResult<Product>;

    /// Does not check that the id exists.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// [`ProductService`] over any [`ProductRepository`].
#[derive(Clone)]
pub struct ProductFacade<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductFacade<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: ProductRepository> ProductService for ProductFacade<R> {
    async fn list_all(&self) -> AppResult<Vec<Product>> {
        self.repository.find_all().await
    }

    async fn create(&self, payload: ProductPayload) -> AppResult<Product> {
        let product = self.repository.insert(payload).await?;
        debug!(id = product.id, "Inserted product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        let product = self.repository.save(product).await?;
        debug!(id = product.id, "Saved product");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.delete_by_id(id).await?;
        debug!(id, "Deleted product");
        Ok(())
    }
}
