//! Integration tests for order placement through `AppState`.
//!
//! The main service is replaced by an in-process `OrderApi` so these tests
//! run without network access.

#![allow(clippy::unwrap_used)]

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use shahd_core::{CurrencyCode, CustomerId, OrderId, OrderStatus, ProductId, ShippingAddress};
use shahd_integration_tests::{dec, product};
use shahd_storefront::api::{ApiError, CreateOrderRequest, Order, OrderApi};
use shahd_storefront::cart::{CartStore, MemoryCartRepository, StockPolicy};
use shahd_storefront::checkout::CheckoutError;
use shahd_storefront::config::{CartConfig, MainServiceConfig, StorefrontConfig};
use shahd_storefront::error::AppError;
use shahd_storefront::state::AppState;

/// Order service double that records submissions.
#[derive(Default)]
struct RecordingOrders {
    submitted: Mutex<Vec<CreateOrderRequest>>,
    reject: Option<(u16, &'static str)>,
}

impl RecordingOrders {
    fn rejecting(status: u16, message: &'static str) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            reject: Some((status, message)),
        }
    }

    fn submitted(&self) -> Vec<CreateOrderRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

impl OrderApi for RecordingOrders {
    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send {
        self.submitted.lock().unwrap().push(request.clone());

        let result = match self.reject {
            Some((status, message)) => Err(ApiError::Api {
                status,
                message: message.to_string(),
            }),
            None => Ok(Order {
                order_id: OrderId::new("9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d"),
                order_number: "ORD-20261016-0001".to_string(),
                customer_id: request.customer_id.clone(),
                customer_name: Some("Layla".to_string()),
                order_date: Utc::now(),
                status: OrderStatus::Pending,
                total_amount: dec("29.48"),
                shipping_street: request.shipping_street.clone(),
                shipping_city: request.shipping_city.clone(),
                shipping_state: request.shipping_state.clone(),
                shipping_postal_code: request.shipping_postal_code.clone(),
                shipping_country: request.shipping_country.clone(),
                tracking_number: None,
                order_items: Vec::new(),
            }),
        };

        async move { result }
    }
}

fn config() -> StorefrontConfig {
    StorefrontConfig {
        main_service: MainServiceConfig {
            base_url: "http://localhost:5001".parse().unwrap(),
            access_token: None,
            timeout: Duration::from_secs(5),
        },
        cart: CartConfig::default(),
        currency: CurrencyCode::USD,
    }
}

fn address() -> ShippingAddress {
    ShippingAddress::parse("12 Rainbow St", "Amman", "AM", "11118", "JO").unwrap()
}

fn state_with(
    repo: &MemoryCartRepository,
    orders: RecordingOrders,
) -> AppState<MemoryCartRepository, RecordingOrders> {
    let mut cart = CartStore::new(repo.clone(), StockPolicy::Soft);
    cart.add_item(product("P1", "12.99", 10), 2);
    cart.add_item(product("P2", "3.50", 1), 1);
    AppState::new(config(), cart, orders)
}

#[tokio::test]
async fn test_successful_checkout_clears_cart() {
    let repo = MemoryCartRepository::new();
    let mut state = state_with(&repo, RecordingOrders::default());

    let order = state
        .checkout(CustomerId::new("C-42"), &address())
        .await
        .unwrap();

    assert_eq!(order.order_number, "ORD-20261016-0001");
    assert_eq!(order.customer_id.as_str(), "C-42");
    assert!(state.cart().is_empty());

    // The cleared cart is what survives a reload.
    let reloaded = CartStore::load(repo, StockPolicy::Soft);
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn test_checkout_submits_cart_lines_and_address() {
    let repo = MemoryCartRepository::new();
    let mut state = state_with(&repo, RecordingOrders::default());

    state
        .checkout(CustomerId::new("C-42"), &address())
        .await
        .unwrap();

    let submitted = state.main_service().submitted();
    assert_eq!(submitted.len(), 1);
    let request = submitted.first().unwrap();

    let lines: Vec<(&str, u32)> = request
        .order_items
        .iter()
        .map(|l| (l.product_id.as_str(), l.quantity))
        .collect();
    assert_eq!(lines, [("P1", 2), ("P2", 1)]);
    assert_eq!(request.shipping_city, "Amman");
    assert_eq!(request.shipping_postal_code, "11118");

    let json = serde_json::to_value(request).unwrap();
    assert_eq!(json["customerId"], "C-42");
    assert_eq!(json["orderItems"][0]["productId"], "P1");
    assert_eq!(json["shippingCountry"], "JO");
}

#[tokio::test]
async fn test_rejected_checkout_keeps_cart() {
    let repo = MemoryCartRepository::new();
    let mut state = state_with(&repo, RecordingOrders::rejecting(409, "Insufficient stock"));
    let before = state.cart().state().clone();

    let err = state
        .checkout(CustomerId::new("C-42"), &address())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Api(ApiError::Api { status: 409, .. })
    ));
    assert_eq!(state.cart().state(), &before);
    assert_eq!(state.cart().total_price(), dec("29.48"));

    let message = AppError::from(err).user_message();
    assert!(message.contains("Insufficient stock"));
}

#[tokio::test]
async fn test_empty_cart_is_not_submitted() {
    let orders = RecordingOrders::default();
    let cart = CartStore::new(MemoryCartRepository::new(), StockPolicy::Soft);
    let mut state = AppState::new(config(), cart, orders);

    let err = state
        .checkout(CustomerId::new("C-42"), &address())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(state.main_service().submitted().is_empty());
}

#[tokio::test]
async fn test_blank_address_is_not_submitted() {
    let repo = MemoryCartRepository::new();
    let mut state = state_with(&repo, RecordingOrders::default());

    // Bypass `parse` the way a stored or posted address would arrive.
    let address: ShippingAddress = serde_json::from_value(serde_json::json!({
        "street": "12 Rainbow St",
        "city": "   ",
        "state": "AM",
        "postal_code": "11118",
        "country": "JO"
    }))
    .unwrap();

    let err = state
        .checkout(CustomerId::new("C-42"), &address)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::InvalidAddress(_)));
    assert!(state.main_service().submitted().is_empty());
    assert_eq!(state.cart().items().len(), 2);
}

#[test]
fn test_summary_reports_stock_and_totals() {
    let repo = MemoryCartRepository::new();
    let mut state = state_with(&repo, RecordingOrders::default());
    state.cart_mut().update_quantity(&ProductId::new("P2"), 3);

    let summary = state.summary();

    assert_eq!(summary.total_items, 5);
    assert_eq!(summary.subtotal_amount(), dec("36.48"));
    assert_eq!(summary.total(), summary.subtotal);
    assert!(summary.has_stock_warnings());
    let warning = summary.warnings.first().unwrap();
    assert_eq!(warning.product_id.as_str(), "P2");
    assert_eq!(warning.message(), "Only 1 in stock");
    assert_ne!(summary.subtotal_amount(), Decimal::ZERO);
}
