//! Integration test support for the Rocket Shoes cart engine.
//!
//! Provides an in-process mock of the store API (the same read-only
//! contract the real storefront serves) and a [`TestContext`] bundling a
//! mock server with a temp-directory-backed cart store.
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = TestContext::start(catalog()).await;
//! let store = ctx.store();
//!
//! store.add_product(ProductId::new(1)).await?;
//! ctx.api.set_stock(ProductId::new(1), 0).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

use rocket_shoes_cart::{CartConfig, CartStorage, CartStore, StoreApiClient};
use rocket_shoes_core::{CartItem, CatalogProduct, ProductId, StockLevel};

// =============================================================================
// Mock store API
// =============================================================================

/// Shared state of the mock store API.
#[derive(Clone)]
struct MockState {
    products: Arc<Vec<CatalogProduct>>,
    stock: Arc<RwLock<HashMap<ProductId, u32>>>,
}

/// Optional `id` filter accepted by the list routes.
#[derive(Deserialize)]
struct ListQuery {
    id: Option<i64>,
}

/// Product record in the wire shape the real store API serves.
///
/// The real API is plain JSON with numeric prices; `CatalogProduct` would
/// serialize its `Decimal` price as a string, so the mock answers with this
/// shape instead to keep the client honest.
#[derive(Serialize)]
struct WireProduct {
    id: i64,
    title: String,
    price: f64,
    image: String,
}

impl From<&CatalogProduct> for WireProduct {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            price: product.price.to_f64().unwrap_or_default(),
            image: product.image.clone(),
        }
    }
}

/// A running in-process mock of the store API.
pub struct MockStoreApi {
    addr: SocketAddr,
    stock: Arc<RwLock<HashMap<ProductId, u32>>>,
}

impl MockStoreApi {
    /// Start the mock on a random port, seeded with `(product, stock)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound (test environment problem).
    pub async fn start(catalog: Vec<(CatalogProduct, u32)>) -> Self {
        let stock: HashMap<ProductId, u32> = catalog
            .iter()
            .map(|(product, amount)| (product.id, *amount))
            .collect();
        let stock = Arc::new(RwLock::new(stock));

        let state = MockState {
            products: Arc::new(catalog.into_iter().map(|(product, _)| product).collect()),
            stock: Arc::clone(&stock),
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock store API listener");
        let addr = listener.local_addr().expect("mock store API local addr");

        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("serve mock store API");
        });

        Self { addr, stock }
    }

    /// Base URL of the running mock.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Overwrite the available stock for a product.
    pub async fn set_stock(&self, id: ProductId, amount: u32) {
        self.stock.write().await.insert(id, amount);
    }
}

fn app(state: MockState) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/stock", get(list_stock))
        .route("/stock/{id}", get(get_stock))
        .with_state(state)
}

async fn list_products(
    State(state): State<MockState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<WireProduct>> {
    let products = state
        .products
        .iter()
        .filter(|product| query.id.is_none_or(|id| product.id == ProductId::new(id)))
        .map(WireProduct::from)
        .collect();
    Json(products)
}

async fn get_product(
    State(state): State<MockState>,
    Path(id): Path<i64>,
) -> Result<Json<WireProduct>, StatusCode> {
    state
        .products
        .iter()
        .find(|product| product.id == ProductId::new(id))
        .map(|product| Json(WireProduct::from(product)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_stock(
    State(state): State<MockState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<StockLevel>> {
    let stock = state.stock.read().await;
    let mut levels: Vec<StockLevel> = stock
        .iter()
        .map(|(id, amount)| StockLevel {
            id: *id,
            amount: *amount,
        })
        .filter(|level| query.id.is_none_or(|wanted| level.id == ProductId::new(wanted)))
        .collect();
    levels.sort_by_key(|level| level.id);
    Json(levels)
}

async fn get_stock(
    State(state): State<MockState>,
    Path(id): Path<i64>,
) -> Result<Json<StockLevel>, StatusCode> {
    let stock = state.stock.read().await;
    stock
        .get(&ProductId::new(id))
        .map(|amount| {
            Json(StockLevel {
                id: ProductId::new(id),
                amount: *amount,
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

// =============================================================================
// Test context
// =============================================================================

/// A mock store API plus a cart store persisted under a temp directory.
pub struct TestContext {
    /// The running mock store API.
    pub api: MockStoreApi,
    dir: tempfile::TempDir,
}

impl TestContext {
    /// Start a mock seeded with `catalog` and prepare an empty mirror path.
    pub async fn start(catalog: Vec<(CatalogProduct, u32)>) -> Self {
        let api = MockStoreApi::start(catalog).await;
        let dir = tempfile::tempdir().expect("create temp dir");
        Self { api, dir }
    }

    /// The engine configuration pointing at the mock and the temp mirror.
    ///
    /// # Panics
    ///
    /// Panics if the mock's address fails to parse as a URL.
    #[must_use]
    pub fn config(&self) -> CartConfig {
        let base = format!("{}/", self.api.base_url())
            .parse()
            .expect("mock base URL");
        CartConfig::new(base, self.mirror_path(), Duration::from_secs(5))
    }

    /// Path of the persisted cart mirror.
    #[must_use]
    pub fn mirror_path(&self) -> PathBuf {
        self.dir.path().join("cart.json")
    }

    /// Open a cart store over the mock and the mirror.
    ///
    /// Opening twice with the same context simulates a new session reading
    /// the previous session's mirror.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened.
    #[must_use]
    pub fn store(&self) -> CartStore {
        CartStore::from_config(&self.config()).expect("open cart store")
    }

    /// The raw API client, for tests that probe fetches directly.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn api_client(&self) -> StoreApiClient {
        StoreApiClient::new(&self.config()).expect("build store API client")
    }

    /// Read the persisted mirror back through storage.
    ///
    /// # Panics
    ///
    /// Panics if the mirror cannot be read.
    #[must_use]
    pub fn read_mirror(&self) -> Vec<CartItem> {
        CartStorage::new(self.mirror_path())
            .load()
            .expect("read cart mirror")
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A catalog product in the shape the store API serves.
#[must_use]
pub fn product(id: i64, title: &str, price: &str) -> CatalogProduct {
    CatalogProduct {
        id: ProductId::new(id),
        title: title.to_string(),
        price: price.parse().expect("fixture price"),
        image: format!("https://rocketshoes.example/images/shoe-{id}.jpg"),
    }
}

/// The standard three-shoe catalog used across the tests.
#[must_use]
pub fn catalog() -> Vec<(CatalogProduct, u32)> {
    vec![
        (product(1, "Tênis de Caminhada Leve Confortável", "179.9"), 5),
        (product(2, "Tênis VR Caminhada Confortável Detalhes Couro", "139.9"), 3),
        (product(3, "Tênis Adapt Style Preto", "149.9"), 0),
    ]
}
