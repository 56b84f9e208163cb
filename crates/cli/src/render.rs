//! Plain-text rendering of the cart, orders and catalog pages.
#![allow(clippy::print_stdout)]

use std::fmt::Write;

use shahd_core::{CurrencyCode, format_currency};
use shahd_storefront::api::{Order, ProductListResponse};
use shahd_storefront::checkout::OrderSummary;

pub fn summary(summary: &OrderSummary) {
    print!("{}", format_summary(summary));
}

pub fn order_placed(order: &Order, currency: CurrencyCode) {
    println!(
        "Order {} placed ({}), total {}",
        order.order_number,
        order.status,
        format_currency(order.total_amount, currency)
    );
}

pub fn orders(orders: &[Order], currency: CurrencyCode) {
    print!("{}", format_orders(orders, currency));
}

pub fn order_detail(order: &Order, currency: CurrencyCode) {
    print!("{}", format_order_detail(order, currency));
}

pub fn products(page: &ProductListResponse, currency: CurrencyCode) {
    print!("{}", format_products(page, currency));
}

fn format_summary(summary: &OrderSummary) -> String {
    if summary.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for line in &summary.lines {
        let _ = writeln!(
            out,
            "{} ({})  {} x {}  {}",
            line.name, line.product_id, line.quantity, line.unit_price, line.line_total
        );
        if let Some(warning) = summary
            .warnings
            .iter()
            .find(|w| w.product_id == line.product_id)
        {
            let _ = writeln!(out, "  ! {}", warning.message());
        }
    }

    let _ = writeln!(out, "Items ({})  {}", summary.total_items, summary.subtotal);
    let _ = writeln!(out, "Shipping  Calculated at next step");
    let _ = writeln!(out, "Total  {}", summary.total());
    out
}

fn placed_on(order: &Order) -> String {
    order.order_date.format("%B %-d, %Y").to_string()
}

fn format_orders(orders: &[Order], currency: CurrencyCode) -> String {
    if orders.is_empty() {
        return "No orders found\n".to_string();
    }

    let mut out = String::new();
    for order in orders {
        let count = order.order_items.len();
        let _ = writeln!(
            out,
            "Order #{}  {}  Placed on {}",
            order.order_number,
            order.status.label(),
            placed_on(order)
        );
        let _ = writeln!(
            out,
            "  {}  {} item{}  {}, {}  [{}]",
            format_currency(order.total_amount, currency),
            count,
            if count == 1 { "" } else { "s" },
            order.shipping_city,
            order.shipping_state,
            order.order_id
        );
        if let Some(tracking) = &order.tracking_number {
            let _ = writeln!(out, "  Tracking {tracking}");
        }
    }
    out
}

fn format_order_detail(order: &Order, currency: CurrencyCode) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Order #{}  {}",
        order.order_number,
        order.status.label()
    );
    let _ = writeln!(out, "Placed on {}", placed_on(order));
    if let Some(tracking) = &order.tracking_number {
        let _ = writeln!(out, "Tracking {tracking}");
    }

    let _ = writeln!(out);
    for item in &order.order_items {
        let name = item
            .product_name
            .clone()
            .unwrap_or_else(|| format!("Product ID: {}", item.product_id));
        let _ = writeln!(
            out,
            "{name}  {} x {}  {}",
            item.quantity,
            format_currency(item.unit_price, currency),
            format_currency(item.subtotal, currency)
        );
    }
    let _ = writeln!(
        out,
        "Total  {}",
        format_currency(order.total_amount, currency)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Ship to");
    let _ = writeln!(out, "  {}", order.shipping_street);
    let _ = writeln!(
        out,
        "  {}, {} {}",
        order.shipping_city, order.shipping_state, order.shipping_postal_code
    );
    let _ = writeln!(out, "  {}", order.shipping_country);
    out
}

fn format_products(page: &ProductListResponse, currency: CurrencyCode) -> String {
    if page.products.is_empty() {
        return "No products found\n".to_string();
    }

    let mut out = String::new();
    for product in &page.products {
        let stock = if product.is_out_of_stock() {
            "Out of stock".to_string()
        } else {
            format!("{} in stock", product.stock_quantity)
        };
        let _ = writeln!(
            out,
            "{} ({})  {}  {}  {stock}",
            product.name,
            product.id,
            product.category,
            format_currency(product.price, currency)
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} products)",
        page.page,
        page.total_pages.max(1),
        page.total_count
    );
    out
}
