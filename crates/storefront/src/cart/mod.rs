//! Client-side shopping cart.
//!
//! - [`CartStore`] - owned cart with mutation and query operations
//! - [`CartRepository`] - persistence collaborator injected into the store
//! - [`CartState`] / [`CartItem`] - the persisted data model

mod repository;
mod state;
mod store;

pub use repository::{
    CART_DOCUMENT_VERSION, CartRepository, DEFAULT_STORAGE_KEY, FileCartRepository,
    MemoryCartRepository, RepositoryError,
};
pub use state::{CartItem, CartState, OrderLine, StockWarning};
pub use store::{CartStore, StockPolicy};
