use serde::{Deserialize, Serialize};

/// Inventory record. The JSON names match the `producto` table and the
/// frontend that consumes this API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    #[serde(rename = "idProducto")]
    #[sqlx(rename = "id_producto")]
    pub id: i32,
    #[serde(rename = "descripcion")]
    #[sqlx(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    #[sqlx(rename = "precio")]
    pub price: f64,
    /// Units on hand
    #[serde(rename = "existencia")]
    #[sqlx(rename = "existencia")]
    pub stock: i32,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of create and update requests. Any `idProducto` the client sends is
/// ignored: the store assigns ids on create and the path names the row on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "existencia")]
    pub stock: i32,
}

impl ProductPayload {
    /// Full replace: every mutable field comes from the payload.
    pub fn with_id(self, id: i32) -> Product {
        Product {
            id,
            description: self.description,
            price: self.price,
            stock: self.stock,
        }
    }
}
