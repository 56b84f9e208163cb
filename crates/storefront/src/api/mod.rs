//! Main commerce service client.
//!
//! The storefront talks to the main service for:
//! - product snapshots when an item is added to the cart
//! - catalog browsing with filters and paging
//! - order creation at checkout
//! - a customer's order history
//!
//! All endpoints live under `<base_url>/api/v1`.

mod types;

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use shahd_core::{CustomerId, OrderId, ProductId, ProductSnapshot};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::MainServiceConfig;

pub use types::{CreateOrderRequest, Order, OrderItem, ProductFilters, ProductListResponse};

/// Errors that can occur when calling the main service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured access token is not a valid header value.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// The configured base URL cannot carry a path.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Whether the service rejected the request as not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// Order creation, the checkout flow's only collaborator.
pub trait OrderApi {
    /// Submit an order.
    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;
}

/// HTTP client for the main commerce service.
#[derive(Debug, Clone)]
pub struct MainServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl MainServiceClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the access token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &MainServiceConfig) -> Result<Self, ApiError> {
        let client = Self::client_builder(config)?.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn client_builder(config: &MainServiceConfig) -> Result<reqwest::ClientBuilder, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert("Authorization", value);
        }

        Ok(reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout))
    }

    /// Fetch the current catalog data for a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<ProductSnapshot, ApiError> {
        let url = self.endpoint(&["products", product_id.as_str()])?;
        let response = self.client.get(url).send().await?;
        Self::parse(response).await
    }

    /// Fetch one page of the catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<ProductListResponse, ApiError> {
        let mut url = self.endpoint(&["products"])?;
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        let response = self.client.get(url).send().await?;
        let page: ProductListResponse = Self::parse(response).await?;
        tracing::debug!(
            returned = page.products.len(),
            total = page.total_count,
            "Listed products"
        );
        Ok(page)
    }

    /// Fetch a customer's order history.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn get_customer_orders(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["customers", customer_id.as_str(), "orders"])?;
        let response = self.client.get(url).send().await?;
        Self::parse(response).await
    }

    /// Fetch an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders", order_id.as_str()])?;
        let response = self.client.get(url).send().await?;
        Self::parse(response).await
    }

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects the order
    /// (for example when stock has run out since the cart was filled).
    #[instrument(
        skip(self, request),
        fields(customer_id = %request.customer_id, lines = request.order_items.len())
    )]
    pub async fn submit_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders"])?;
        let response = self.client.post(url).json(request).send().await?;
        let order: Order = Self::parse(response).await?;
        tracing::info!(order_id = %order.order_id, "Order created");
        Ok(order)
    }

    /// Build `<base_url>/api/v1/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl OrderApi for MainServiceClient {
    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send {
        self.submit_order(request)
    }
}

/// Pull a readable message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<types::ErrorBody>(body)
        .ok()
        .and_then(types::ErrorBody::into_message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_owned()
        })
}
