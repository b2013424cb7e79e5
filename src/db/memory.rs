use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::error::AppResult;
use crate::models::{Product, ProductPayload};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

/// Process-local store with serial ids, mirroring the Postgres table.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, payload: ProductPayload) -> AppResult<Product> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let product = payload.with_id(table.last_id);
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        let mut table = self.table.write().await;
        // Keep the serial ahead of explicitly saved ids, as a sequence would.
        table.last_id = table.last_id.max(product.id);
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(description: &str, price: f64, stock: i32) -> ProductPayload {
        ProductPayload {
            description: description.to_string(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.insert(payload("Mouse", 10.0, 5)).await.unwrap();
        let second = repo.insert(payload("Monitor", 150.0, 2)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.description, "Monitor");
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for name in ["C", "A", "B"] {
            repo.insert(payload(name, 1.0, 1)).await.unwrap();
        }

        let ids: Vec<i32> = repo.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn save_overwrites_existing_row() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(payload("Original", 150.0, 5)).await.unwrap();

        let saved = repo
            .save(payload("Actualizado", 200.0, 20).with_id(created.id))
            .await
            .unwrap();

        assert_eq!(saved.id, created.id);
        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.description, "Actualizado");
        assert_eq!(stored.price, 200.0);
        assert_eq!(stored.stock, 20);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_and_advances_serial() {
        let repo = InMemoryProductRepository::new();
        repo.save(payload("Importado", 1.0, 1).with_id(10)).await.unwrap();

        let next = repo.insert(payload("Nuevo", 1.0, 1)).await.unwrap();
        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn delete_removes_row_and_tolerates_missing_ids() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(payload("Cable", 2.0, 100)).await.unwrap();

        repo.delete_by_id(created.id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());

        repo.delete_by_id(999).await.unwrap();
    }
}
