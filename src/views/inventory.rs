//! Inventory management: searchable, sortable product table with add, edit
//! and two-step delete.

use crate::{
    core::{
        metrics::{InventorySummary, low_stock_products},
        product::{self, ProductForm, StockStatus},
    },
    entities::product::Model as Product,
    errors::Result,
    views::format::format_currency,
};
use sea_orm::DatabaseConnection;
use std::{cmp::Ordering, fmt::Write};
use tracing::debug;

/// Column the table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Price,
    Stock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Which dialog is open over the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit(i64),
    /// First step of a delete; nothing is removed until confirmed
    ConfirmDelete(i64),
}

/// State owned by the inventory view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryView {
    pub search: String,
    pub sort: SortConfig,
    pub modal: Modal,
    pub form: ProductForm,
    /// Validation message shown inside the open modal
    pub error: Option<String>,
}

impl InventoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Sorts by `key`; asking for the current ascending key again flips to
    /// descending, anything else starts ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        let direction = if self.sort.key == key && self.sort.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort = SortConfig { key, direction };
    }

    /// Products to show: sorted, then filtered by the search term
    /// (case-insensitive substring of the name).
    #[must_use]
    pub fn visible_products<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<&Product> = products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect();

        let SortConfig { key, direction } = self.sort;
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    pub fn open_add(&mut self) {
        self.form = ProductForm::default();
        self.error = None;
        self.modal = Modal::Add;
    }

    pub fn open_edit(&mut self, product: &Product) {
        self.form = ProductForm::from_product(product);
        self.error = None;
        self.modal = Modal::Edit(product.id);
    }

    pub fn open_delete(&mut self, product_id: i64) {
        self.error = None;
        self.modal = Modal::ConfirmDelete(product_id);
    }

    pub fn close(&mut self) {
        self.error = None;
        self.modal = Modal::Closed;
    }

    /// Saves the add or edit modal.
    ///
    /// Validation failures stay in the modal as [`InventoryView::error`] and
    /// return `Ok(None)`. Returns `Ok(None)` without doing anything when no
    /// add or edit modal is open.
    ///
    /// # Errors
    /// Only store failures are returned.
    pub async fn submit(&mut self, db: &DatabaseConnection) -> Result<Option<Product>> {
        let result = match self.modal {
            Modal::Add => product::create_product(db, &self.form).await,
            Modal::Edit(id) => product::update_product(db, id, &self.form).await,
            Modal::Closed | Modal::ConfirmDelete(_) => return Ok(None),
        };

        match result {
            Ok(saved) => {
                self.close();
                Ok(Some(saved))
            }
            Err(e) if e.is_validation() => {
                debug!(error = %e, "Product form rejected");
                self.error = Some(e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Second step of a delete. Does nothing unless a delete confirmation is
    /// open.
    ///
    /// # Errors
    /// Only store failures are returned; a product that vanished in the
    /// meantime is reported in [`InventoryView::error`].
    pub async fn confirm_delete(&mut self, db: &DatabaseConnection) -> Result<Option<Product>> {
        let Modal::ConfirmDelete(id) = self.modal else {
            return Ok(None);
        };

        match product::delete_product(db, id).await {
            Ok(removed) => {
                self.close();
                Ok(Some(removed))
            }
            Err(e) if e.is_validation() => {
                self.error = Some(e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Loads products from the store and renders the view.
    pub async fn render(&self, db: &DatabaseConnection) -> Result<String> {
        let products = product::get_all_products(db).await?;
        self.render_with(&products)
    }

    pub fn render_with(&self, products: &[Product]) -> Result<String> {
        let mut out = String::new();
        let summary = InventorySummary::from_products(products);

        writeln!(out, "Inventory Management")?;
        writeln!(out, "Add, edit, and manage your inventory items")?;
        writeln!(
            out,
            "Products: {} | Units: {} | Value: {} | Low stock: {} | Out of stock: {}",
            summary.product_count,
            summary.units_in_stock,
            format_currency(summary.inventory_value),
            summary.low_stock_count,
            summary.out_of_stock_count
        )?;

        let low = low_stock_products(products);
        if !low.is_empty() {
            let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
            writeln!(out, "⚠️ Needs restocking: {}", names.join(", "))?;
        }
        writeln!(out)?;

        if !self.search.is_empty() {
            writeln!(out, "Search: \"{}\"", self.search)?;
        }
        writeln!(
            out,
            "{:>4} | {:<24} | {:>10} | {:>5} | {}",
            heading("ID", SortKey::Id, self.sort),
            heading("Product", SortKey::Name, self.sort),
            heading("Price", SortKey::Price, self.sort),
            heading("Stock", SortKey::Stock, self.sort),
            "Status"
        )?;
        let rows = self.visible_products(products);
        if rows.is_empty() {
            writeln!(out, "No products found.")?;
        }
        for p in rows {
            writeln!(
                out,
                "{:>4} | {:<24} | {:>10} | {:>5} | {}",
                p.id,
                p.name,
                format_currency(p.price),
                p.stock,
                StockStatus::of(p)
            )?;
        }

        match self.modal {
            Modal::Closed => {}
            Modal::Add => self.render_form(&mut out, "Add New Product")?,
            Modal::Edit(id) => self.render_form(&mut out, &format!("Edit Product #{id}"))?,
            Modal::ConfirmDelete(id) => {
                let name = products
                    .iter()
                    .find(|p| p.id == id)
                    .map_or("this product", |p| p.name.as_str());
                writeln!(out)?;
                writeln!(
                    out,
                    "Delete Product: are you sure you want to delete {name}? This cannot be undone."
                )?;
            }
        }
        if let Some(error) = &self.error {
            writeln!(out, "❌ {error}")?;
        }

        Ok(out)
    }

    fn render_form(&self, out: &mut String, title: &str) -> Result<()> {
        fn field<T: ToString>(value: Option<T>) -> String {
            value.map_or_else(String::new, |v| v.to_string())
        }

        writeln!(out)?;
        writeln!(out, "{title}")?;
        writeln!(out, "  Product Name *: {}", self.form.name)?;
        writeln!(out, "  Price ($) *: {}", field(self.form.price))?;
        writeln!(out, "  Stock Quantity *: {}", field(self.form.stock))?;
        writeln!(out, "  Low Stock Threshold *: {}", field(self.form.threshold))?;
        writeln!(out, "  Image URL: {}", self.form.image)?;
        Ok(())
    }
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Stock => a.stock.cmp(&b.stock),
    }
}

fn heading(title: &str, key: SortKey, sort: SortConfig) -> String {
    if sort.key != key {
        return title.to_string();
    }
    match sort.direction {
        SortDirection::Ascending => format!("{title} ▲"),
        SortDirection::Descending => format!("{title} ▼"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{
            product::get_all_products,
            sale::{SaleRequest, get_all_sales, record_sale},
        },
        test_utils::{create_test_product, product_form, product_model, setup_test_db},
    };
    use chrono::Utc;

    fn sample() -> Vec<Product> {
        vec![
            product_model(1, "Wireless Mouse", 25.0, 40),
            product_model(2, "USB Cable", 5.0, 3),
            product_model(3, "Monitor", 180.0, 0),
        ]
    }

    fn ids(rows: &[&Product]) -> Vec<i64> {
        rows.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_sort_toggles_direction() {
        let products = sample();
        let mut view = InventoryView::new();
        assert_eq!(ids(&view.visible_products(&products)), vec![1, 2, 3]);

        view.request_sort(SortKey::Price);
        assert_eq!(view.sort.direction, SortDirection::Ascending);
        assert_eq!(ids(&view.visible_products(&products)), vec![2, 1, 3]);

        view.request_sort(SortKey::Price);
        assert_eq!(view.sort.direction, SortDirection::Descending);
        assert_eq!(ids(&view.visible_products(&products)), vec![3, 1, 2]);

        view.request_sort(SortKey::Name);
        assert_eq!(view.sort.direction, SortDirection::Ascending);
        assert_eq!(ids(&view.visible_products(&products)), vec![3, 2, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = sample();
        let mut view = InventoryView::new();
        view.set_search("us");
        assert_eq!(ids(&view.visible_products(&products)), vec![1, 2]);

        view.set_search("MONITOR");
        assert_eq!(ids(&view.visible_products(&products)), vec![3]);

        view.set_search("keyboard");
        assert!(view.visible_products(&products).is_empty());
        assert!(view.render_with(&products).unwrap().contains("No products found."));
    }

    #[test]
    fn test_render_shows_status_and_alerts() {
        let text = InventoryView::new().render_with(&sample()).unwrap();
        assert!(text.contains("Low Stock"));
        assert!(text.contains("Out of Stock"));
        assert!(text.contains("In Stock"));
        assert!(text.contains("Needs restocking: USB Cable, Monitor"));
        assert!(text.contains("ID ▲"));
    }

    #[tokio::test]
    async fn test_add_and_edit_through_modal() -> Result<()> {
        let db = setup_test_db().await?;
        let mut view = InventoryView::new();

        view.open_add();
        assert_eq!(view.modal, Modal::Add);
        assert!(view.submit(&db).await?.is_none());
        assert_eq!(
            view.error.as_deref(),
            Some("Please fill in all required fields")
        );
        assert_eq!(view.modal, Modal::Add);

        view.form = product_form("Desk Lamp", 19.99, 8, 2);
        let created = view.submit(&db).await?.unwrap();
        assert_eq!(view.modal, Modal::Closed);
        assert!(view.error.is_none());

        view.open_edit(&created);
        assert_eq!(view.modal, Modal::Edit(created.id));
        view.form.stock = Some(1);
        let edited = view.submit(&db).await?.unwrap();
        assert_eq!(edited.stock, 1);
        assert_eq!(edited.id, created.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Tripod", 35.0, 4, 1).await?;
        record_sale(&db, SaleRequest::new(product.id, 1), Utc::now()).await?;
        let sales_before = get_all_sales(&db).await?;

        let mut view = InventoryView::new();
        assert!(view.confirm_delete(&db).await?.is_none());
        assert_eq!(get_all_products(&db).await?.len(), 1);

        view.open_delete(product.id);
        let text = view.render(&db).await?;
        assert!(text.contains("are you sure you want to delete Tripod?"));

        view.close();
        assert!(view.confirm_delete(&db).await?.is_none());
        assert_eq!(get_all_products(&db).await?.len(), 1);

        view.open_delete(product.id);
        let removed = view.confirm_delete(&db).await?.unwrap();
        assert_eq!(removed.id, product.id);
        assert_eq!(view.modal, Modal::Closed);
        assert!(get_all_products(&db).await?.is_empty());
        assert_eq!(get_all_sales(&db).await?, sales_before);

        Ok(())
    }
}
