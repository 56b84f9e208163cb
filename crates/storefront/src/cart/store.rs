//! The cart store: owned cart state plus its persistence side effect.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use shahd_core::{ProductId, ProductSnapshot};
use tracing::{debug, info, warn};

use super::repository::{CartRepository, RepositoryError};
use super::state::{CartItem, CartState, OrderLine, StockWarning};

/// How the store treats quantities above a snapshot's reported stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockPolicy {
    /// Accept any quantity; the UI is expected to clamp before calling.
    #[default]
    Soft,
    /// Clamp quantities to the snapshot's stock and refuse out-of-stock adds.
    Enforce,
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soft => f.write_str("soft"),
            Self::Enforce => f.write_str("enforce"),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(Self::Soft),
            "enforce" => Ok(Self::Enforce),
            other => Err(format!("expected 'soft' or 'enforce', got '{other}'")),
        }
    }
}

/// Client-side cart: what the user intends to buy.
///
/// The store is an owned value; pass `&mut` access to whatever services a
/// user action. Every mutating call writes the resulting state through the
/// repository before returning. A failed write is logged and remembered in
/// [`persistence_error`](Self::persistence_error) while the in-memory state
/// stays authoritative.
///
/// Mutations return `true` when the in-memory state changed. Invalid input
/// (quantity below 1, unknown product id) is a no-op, never an error.
#[derive(Debug)]
pub struct CartStore<R> {
    state: CartState,
    repository: R,
    policy: StockPolicy,
    persistence_error: Option<RepositoryError>,
}

impl<R: CartRepository> CartStore<R> {
    /// Create an empty store without reading the repository.
    #[must_use]
    pub fn new(repository: R, policy: StockPolicy) -> Self {
        Self {
            state: CartState::default(),
            repository,
            policy,
            persistence_error: None,
        }
    }

    /// Restore the store from its repository.
    ///
    /// A missing document yields an empty cart. An unreadable document is
    /// logged, recorded as the persistence error, and also yields an empty
    /// cart. Loaded state is normalized so the store invariants hold.
    #[must_use]
    pub fn load(repository: R, policy: StockPolicy) -> Self {
        let mut store = Self::new(repository, policy);

        match store.repository.load() {
            Ok(Some(mut state)) => {
                if state.normalize() {
                    warn!("Persisted cart violated invariants and was normalized");
                }
                debug!(items = state.items.len(), "Restored cart");
                store.state = state;
            }
            Ok(None) => debug!("No persisted cart, starting empty"),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted cart, starting empty");
                store.persistence_error = Some(e);
            }
        }

        store
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` (clamped to at least 1) of `product`.
    ///
    /// If the product is already in the cart its quantity grows and the
    /// existing snapshot is kept; otherwise a new item is appended.
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: i64) -> bool {
        let requested = clamp_quantity(quantity);
        let enforce = self.policy == StockPolicy::Enforce;

        if enforce && product.is_out_of_stock() {
            debug!(product_id = %product.id, "Refusing to add out-of-stock product");
            self.persist();
            return false;
        }

        let changed = if let Some(item) = self.state.item_mut(&product.id) {
            let mut next = item.quantity.saturating_add(requested);
            if enforce {
                // Adding never lowers an existing quantity.
                next = next.min(product.stock_quantity).max(item.quantity);
            }
            let changed = next != item.quantity;
            item.quantity = next;
            changed
        } else {
            let quantity = if enforce {
                requested.min(product.stock_quantity)
            } else {
                requested
            };
            debug!(product_id = %product.id, quantity, "Adding new cart item");
            self.state.items.push(CartItem { product, quantity });
            true
        };

        self.persist();
        changed
    }

    /// Set the quantity of an existing item.
    ///
    /// No-op if `new_quantity < 1` or the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) -> bool {
        let changed = if new_quantity < 1 {
            debug!(%product_id, new_quantity, "Ignoring quantity below 1");
            false
        } else if let Some(item) = self.state.item_mut(product_id) {
            let next = match self.policy {
                StockPolicy::Soft => clamp_quantity(new_quantity),
                StockPolicy::Enforce if item.product.is_out_of_stock() => item.quantity,
                StockPolicy::Enforce => {
                    clamp_quantity(new_quantity).min(item.product.stock_quantity)
                }
            };
            let changed = next != item.quantity;
            item.quantity = next;
            changed
        } else {
            debug!(%product_id, "Ignoring update for product not in cart");
            false
        };

        self.persist();
        changed
    }

    /// Remove the item for `product_id`, if present.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.state.items.len();
        self.state
            .items
            .retain(|item| &item.product.id != product_id);
        let changed = self.state.items.len() != before;

        self.persist();
        changed
    }

    /// Remove every item.
    pub fn clear_cart(&mut self) -> bool {
        let changed = !self.state.items.is_empty();
        self.state.items.clear();

        self.persist();
        changed
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of quantities; 0 for an empty cart.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    /// Sum of `quantity * snapshot price`; 0 for an empty cart.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.state.total_price()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.state.item(product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Items whose quantity is above the stock their snapshot reported.
    #[must_use]
    pub fn stock_warnings(&self) -> Vec<StockWarning> {
        self.state
            .items
            .iter()
            .filter(|item| item.exceeds_stock())
            .map(StockWarning::from)
            .collect()
    }

    /// The lines submitted to the order-creation API.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.state.order_lines()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub const fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// The most recent load or save failure, cleared by the next good save.
    #[must_use]
    pub const fn persistence_error(&self) -> Option<&RepositoryError> {
        self.persistence_error.as_ref()
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    fn persist(&mut self) {
        match self.repository.save(&self.state) {
            Ok(()) => {
                if self.persistence_error.take().is_some() {
                    info!("Cart persistence recovered");
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist cart, keeping in-memory state");
                self.persistence_error = Some(e);
            }
        }
    }
}

/// Clamp a caller-supplied quantity into `1..=u32::MAX`.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}
