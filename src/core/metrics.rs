//! Derived metrics for the dashboard stat cards and low-stock alerts.
//!
//! All functions are pure and recompute from whatever slice they are given.

use crate::{
    core::product::StockStatus,
    entities::{product, sale},
};

/// Sum of all sale totals.
#[must_use]
pub fn total_sales_value(sales: &[sale::Model]) -> f64 {
    sales.iter().map(|s| s.total).sum()
}

/// Sum of all quantities sold.
#[must_use]
pub fn total_items_sold(sales: &[sale::Model]) -> i64 {
    sales.iter().map(|s| s.quantity).sum()
}

/// Mean sale total, 0 when there are no sales.
#[must_use]
pub fn average_sale_value(sales: &[sale::Model]) -> f64 {
    if sales.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = sales.len() as f64;
    total_sales_value(sales) / count
}

/// Products at or below their low-stock threshold, out-of-stock included.
#[must_use]
pub fn low_stock_products(products: &[product::Model]) -> Vec<&product::Model> {
    products
        .iter()
        .filter(|p| StockStatus::of(p) != StockStatus::InStock)
        .collect()
}

/// Stat card values for the sales dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub items_sold: i64,
    pub average_sale: f64,
    pub sale_count: usize,
}

impl SalesSummary {
    #[must_use]
    pub fn from_sales(sales: &[sale::Model]) -> Self {
        Self {
            total_sales: total_sales_value(sales),
            items_sold: total_items_sold(sales),
            average_sale: average_sale_value(sales),
            sale_count: sales.len(),
        }
    }
}

/// Inventory-wide totals shown above the product table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventorySummary {
    /// Number of distinct products
    pub product_count: usize,
    /// Units on hand across all products
    pub units_in_stock: i64,
    /// Sum of `price * stock`
    pub inventory_value: f64,
    /// Products at or below threshold (including out of stock)
    pub low_stock_count: usize,
    /// Products with no stock at all
    pub out_of_stock_count: usize,
}

impl InventorySummary {
    #[must_use]
    pub fn from_products(products: &[product::Model]) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let inventory_value = products.iter().map(|p| p.price * p.stock as f64).sum();

        Self {
            product_count: products.len(),
            units_in_stock: products.iter().map(|p| p.stock).sum(),
            inventory_value,
            low_stock_count: low_stock_products(products).len(),
            out_of_stock_count: products
                .iter()
                .filter(|p| StockStatus::of(p) == StockStatus::OutOfStock)
                .count(),
        }
    }
}
