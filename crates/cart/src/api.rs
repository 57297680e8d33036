//! Store API client for product and stock data.
//!
//! A thin REST client over the storefront's read-only endpoints:
//!
//! - `GET /products` - all catalog products (optionally filtered by `id`)
//! - `GET /products/{id}` - a single catalog product
//! - `GET /stock` - all stock levels (optionally filtered by `id`)
//! - `GET /stock/{id}` - a single stock level
//!
//! The client performs no retries and no caching; callers interpret the
//! typed results. Stock answers are only as fresh as the moment they were
//! fetched.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use rocket_shoes_core::{CatalogProduct, ProductId, StockLevel};

use crate::config::CartConfig;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the store API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct StoreApiClient {
    inner: Arc<StoreApiClientInner>,
}

struct StoreApiClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash; routes are formatted onto it.
    base_url: String,
}

impl StoreApiClient {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CartConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let base_url = config.api_base_url.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(StoreApiClientInner { client, base_url }),
        })
    }

    /// Get a single catalog product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID, or another `ApiError`
    /// if the request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, ApiError> {
        let url = format!("{}/products/{id}", self.inner.base_url);
        get_json(self.inner.client.get(&url), &format!("product {id}")).await
    }

    /// Get catalog products, optionally filtered to a single ID.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        filter: Option<ProductId>,
    ) -> Result<Vec<CatalogProduct>, ApiError> {
        let url = format!("{}/products", self.inner.base_url);
        let mut request = self.inner.client.get(&url);
        if let Some(id) = filter {
            request = request.query(&[("id", id.as_i64())]);
        }
        get_json(request, "products").await
    }

    /// Get the stock level for a single product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID, or another `ApiError`
    /// if the request fails.
    #[instrument(skip(self))]
    pub async fn get_stock(&self, id: ProductId) -> Result<StockLevel, ApiError> {
        let url = format!("{}/stock/{id}", self.inner.base_url);
        get_json(self.inner.client.get(&url), &format!("stock {id}")).await
    }

    /// Get stock levels, optionally filtered to a single ID.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_stock_levels(
        &self,
        filter: Option<ProductId>,
    ) -> Result<Vec<StockLevel>, ApiError> {
        let url = format!("{}/stock", self.inner.base_url);
        let mut request = self.inner.client.get(&url);
        if let Some(id) = filter {
            request = request.query(&[("id", id.as_i64())]);
        }
        get_json(request, "stock").await
    }
}

/// Send a GET request and deserialize the JSON body.
async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    resource: &str,
) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(resource.to_string()));
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
