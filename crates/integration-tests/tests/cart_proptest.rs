//! Randomized operation sequences against the cart store.
//!
//! Each case replays a generated sequence of adds, updates, removals and
//! clears on a store and on a plain list model, checking the store's
//! invariants after every step and a reload from the repository at the end.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;
use shahd_core::{ProductId, ProductSnapshot};
use shahd_storefront::cart::{CartStore, MemoryCartRepository, StockPolicy};

const SLOTS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Add {
        slot: usize,
        cents: i64,
        stock: u32,
        quantity: i64,
    },
    Update {
        slot: usize,
        quantity: i64,
    },
    Remove {
        slot: usize,
    },
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..SLOTS, 0_i64..10_000, 0_u32..20, -3_i64..25).prop_map(
            |(slot, cents, stock, quantity)| Op::Add {
                slot,
                cents,
                stock,
                quantity,
            }
        ),
        2 => (0..SLOTS, -3_i64..25).prop_map(|(slot, quantity)| Op::Update { slot, quantity }),
        2 => (0..SLOTS).prop_map(|slot| Op::Remove { slot }),
        1 => Just(Op::Clear),
    ]
}

fn product_id(slot: usize) -> ProductId {
    ProductId::new(format!("P{slot}"))
}

fn snapshot(slot: usize, cents: i64, stock: u32) -> ProductSnapshot {
    ProductSnapshot {
        id: product_id(slot),
        name: format!("Product {slot}"),
        price: Decimal::new(cents, 2),
        category: "Honey".to_string(),
        image_url: None,
        stock_quantity: stock,
    }
}

fn clamp(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// Expected cart contents as `(slot, unit price, quantity)` in insertion order.
#[derive(Debug, Default)]
struct Model {
    lines: Vec<(usize, Decimal, u32)>,
}

impl Model {
    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Add {
                slot,
                cents,
                quantity,
                ..
            } => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.0 == slot) {
                    line.2 = line.2.saturating_add(clamp(quantity));
                } else {
                    self.lines.push((slot, Decimal::new(cents, 2), clamp(quantity)));
                }
            }
            Op::Update { slot, quantity } => {
                if quantity >= 1 {
                    if let Some(line) = self.lines.iter_mut().find(|l| l.0 == slot) {
                        line.2 = clamp(quantity);
                    }
                }
            }
            Op::Remove { slot } => self.lines.retain(|l| l.0 != slot),
            Op::Clear => self.lines.clear(),
        }
    }
}

fn apply(cart: &mut CartStore<MemoryCartRepository>, op: &Op) {
    match *op {
        Op::Add {
            slot,
            cents,
            stock,
            quantity,
        } => {
            cart.add_item(snapshot(slot, cents, stock), quantity);
        }
        Op::Update { slot, quantity } => {
            cart.update_quantity(&product_id(slot), quantity);
        }
        Op::Remove { slot } => {
            cart.remove_item(&product_id(slot));
        }
        Op::Clear => {
            cart.clear_cart();
        }
    }
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn cart_matches_model_after_every_step(ops in prop::collection::vec(op(), 0..40)) {
        let repo = MemoryCartRepository::new();
        let mut cart = CartStore::new(repo.clone(), StockPolicy::Soft);
        let mut model = Model::default();

        for op in &ops {
            apply(&mut cart, op);
            model.apply(op);

            let mut ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
            let line_count = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), line_count, "duplicate product lines");

            prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));

            let items: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
            let price: Decimal = cart
                .items()
                .iter()
                .map(|i| i.product.price * Decimal::from(i.quantity))
                .sum();
            prop_assert_eq!(cart.total_items(), items);
            prop_assert_eq!(cart.total_price(), price);

            let actual: Vec<(String, Decimal, u32)> = cart
                .items()
                .iter()
                .map(|i| (i.product.id.as_str().to_owned(), i.product.price, i.quantity))
                .collect();
            let expected: Vec<(String, Decimal, u32)> = model
                .lines
                .iter()
                .map(|&(slot, price, quantity)| (format!("P{slot}"), price, quantity))
                .collect();
            prop_assert_eq!(actual, expected);
        }

        let reloaded = CartStore::load(repo, StockPolicy::Soft);
        prop_assert!(reloaded.persistence_error().is_none());
        prop_assert_eq!(reloaded.state(), cart.state());
    }

    #[test]
    fn second_remove_changes_nothing(
        ops in prop::collection::vec(op(), 0..30),
        slot in 0..SLOTS,
    ) {
        let repo = MemoryCartRepository::new();
        let mut cart = CartStore::new(repo.clone(), StockPolicy::Soft);
        for op in &ops {
            apply(&mut cart, op);
        }

        cart.remove_item(&product_id(slot));
        let once = cart.state().clone();
        let stored = repo.document();

        prop_assert!(!cart.remove_item(&product_id(slot)));
        prop_assert_eq!(cart.state(), &once);
        prop_assert_eq!(repo.document(), stored);
    }
}
