//! Product business logic - Handles inventory CRUD and stock status.
//!
//! Products live in the in-memory store. Every create and update goes through
//! [`ProductForm::validate`], which enforces the same rules the inventory form
//! shows to the user. Deleting a product removes it outright; recorded sales
//! keep their own snapshot and are never touched.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;
use tracing::{info, instrument};

/// Image used when the form leaves the image field empty.
pub const DEFAULT_IMAGE: &str = "https://placehold.co/200x200?text=Product";

/// Stock level classification shown in the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// More than `threshold` units on hand
    InStock,
    /// Between 1 and `threshold` units on hand
    LowStock,
    /// Nothing on hand
    OutOfStock,
}

impl StockStatus {
    /// Classifies a stock level against a low-stock threshold.
    #[must_use]
    pub const fn from_levels(stock: i64, threshold: i64) -> Self {
        if stock <= 0 {
            Self::OutOfStock
        } else if stock <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Status of a stored product.
    #[must_use]
    pub const fn of(product: &product::Model) -> Self {
        Self::from_levels(product.stock, product.threshold)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw product form fields as typed by the user. `None` means the field was
/// left blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub threshold: Option<i64>,
    pub image: String,
}

impl ProductForm {
    /// Pre-fills the form from an existing product, as the edit modal does.
    #[must_use]
    pub fn from_product(product: &product::Model) -> Self {
        Self {
            name: product.name.clone(),
            price: Some(product.price),
            stock: Some(product.stock),
            threshold: Some(product.threshold),
            image: product.image.clone(),
        }
    }

    /// Checks every field and returns the clean input.
    ///
    /// # Errors
    /// - [`Error::MissingFields`] when any of name, price, stock or threshold is blank
    /// - [`Error::InvalidPrice`] when the price is negative or not finite
    /// - [`Error::NegativeCount`] when stock or threshold is negative
    pub fn validate(&self) -> Result<ProductInput> {
        let name = self.name.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.stock.is_none() {
            missing.push("stock");
        }
        if self.threshold.is_none() {
            missing.push("threshold");
        }

        let (Some(price), Some(stock), Some(threshold)) = (self.price, self.stock, self.threshold)
        else {
            return Err(Error::MissingFields { fields: missing });
        };
        if !missing.is_empty() {
            return Err(Error::MissingFields { fields: missing });
        }

        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidPrice { price });
        }
        if stock < 0 {
            return Err(Error::NegativeCount {
                field: "Stock",
                value: stock,
            });
        }
        if threshold < 0 {
            return Err(Error::NegativeCount {
                field: "Low stock threshold",
                value: threshold,
            });
        }

        let image = match self.image.trim() {
            "" => DEFAULT_IMAGE.to_string(),
            url => url.to_string(),
        };

        Ok(ProductInput {
            name: name.to_string(),
            price,
            stock,
            threshold,
            image,
        })
    }
}

/// Validated product fields, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub threshold: i64,
    pub image: String,
}

/// Retrieves all products ordered by ID.
pub async fn get_all_products<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by ID, returning None if it does not exist.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a product from a validated form.
///
/// The new product gets one past the highest ID currently in the inventory,
/// or 1 when the inventory is empty. IDs freed by deleting the highest product
/// are handed out again.
///
/// # Errors
/// Returns a validation error if the form is incomplete or invalid, or a
/// database error if the insert fails.
#[instrument(skip(db))]
pub async fn create_product(db: &DatabaseConnection, form: &ProductForm) -> Result<product::Model> {
    let input = form.validate()?;

    let txn = db.begin().await?;
    let id = next_product_id(&txn).await?;

    let product = product::ActiveModel {
        id: Set(id),
        name: Set(input.name),
        price: Set(input.price),
        stock: Set(input.stock),
        threshold: Set(input.threshold),
        image: Set(input.image),
    };
    let created = product.insert(&txn).await?;
    txn.commit().await?;

    info!(product_id = created.id, name = %created.name, "Product created");
    Ok(created)
}

/// Highest product ID plus one, 1 for an empty inventory.
async fn next_product_id<C>(db: &C) -> Result<i64>
where
    C: ConnectionTrait,
{
    let highest = Product::find()
        .order_by_desc(product::Column::Id)
        .one(db)
        .await?
        .map_or(0, |p| p.id);
    Ok(highest + 1)
}

/// Replaces all editable fields of an existing product.
///
/// # Errors
/// Returns a validation error if the form is invalid, [`Error::ProductNotFound`]
/// if no product has this ID, or a database error.
#[instrument(skip(db))]
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    form: &ProductForm,
) -> Result<product::Model> {
    let input = form.validate()?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.name = Set(input.name);
    product.price = Set(input.price);
    product.stock = Set(input.stock);
    product.threshold = Set(input.threshold);
    product.image = Set(input.image);

    let updated = product.update(db).await?;
    info!(product_id, name = %updated.name, "Product updated");
    Ok(updated)
}

/// Removes a product from the inventory and returns what was removed.
///
/// Sales recorded against the product are left as they are.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if no product has this ID, or a database error.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    Product::delete_by_id(product_id).exec(db).await?;

    info!(product_id, name = %product.name, "Product deleted");
    Ok(product)
}
