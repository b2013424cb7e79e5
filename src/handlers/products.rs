use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    handlers::{AppJson, AppPath},
    models::{Product, ProductPayload},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<Product>>)> {
    let start = Instant::now();
    let products = state.products.list_all().await?;
    let elapsed = start.elapsed();

    info!(
        count = products.len(),
        elapsed_ms = elapsed.as_millis(),
        "Products fetched"
    );
    for product in &products {
        info!(?product);
    }

    Ok((StatusCode::OK, Json(products)))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.products.create(payload).await?;

    info!(id = product.id, description = %product.description, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state
        .products
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No se encontró en id {}", id)))?;

    Ok((StatusCode::OK, Json(product)))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let existing = state
        .products
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No se encontró el id {}", id)))?;

    let product = state.products.save(payload.with_id(existing.id)).await?;

    info!(id, "Updated product");

    Ok((StatusCode::OK, Json(product)))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if state.products.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("No se encontró el id {}", id)));
    }

    state.products.delete(id).await?;

    info!(id, "Deleted product");

    Ok((StatusCode::OK, Json(json!({ "eliminado": true }))))
}
