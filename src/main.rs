use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod service;

use crate::config::Config;
use crate::db::{InMemoryProductRepository, PgProductRepository};
use crate::service::{ProductFacade, ProductService};

/// Shared application state, cheap to clone (the service sits behind an Arc).
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventario_app=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let products: Arc<dyn ProductService> = match &config.database_url {
        Some(url) => {
            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(url)
                .await
                .context("failed to connect to DATABASE_URL")?;
            info!("Database connection pool established.");

            info!("Running migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Migrations complete.");

            Arc::new(ProductFacade::new(PgProductRepository::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, products are kept in memory and lost on exit");
            Arc::new(ProductFacade::new(InMemoryProductRepository::new()))
        }
    };

    let state = AppState { products };
    let app = build_router(state, cors_layer(&config.cors_allowed_origin)?);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}/inventario-app/productos", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("CORS_ALLOWED_ORIGIN is not a valid origin: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let productos = Router::new()
        .route(
            "/productos",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/productos/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        );

    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Products CRUD ───────────────────────────────────────────────────
        .nest("/inventario-app", productos)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
