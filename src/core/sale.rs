//! Sale admission - turns a requested sale into a stock change and a sale record.
//!
//! A request is checked against the current inventory and, if it passes, the
//! product's stock is decremented and a sale carrying a snapshot of the
//! product's name and price is appended. Check and apply share one database
//! transaction, so a rejected request leaves the store exactly as it was.

use crate::{
    entities::{Product, Sale, product, sale},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// A sale as submitted from the sale form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleRequest {
    /// Selected product, `None` when the dropdown is still on its placeholder
    pub product_id: Option<i64>,
    /// Requested units
    pub quantity: i64,
}

impl SaleRequest {
    #[must_use]
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        Self {
            product_id: Some(product_id),
            quantity,
        }
    }
}

/// Price the sale form shows before submitting: unit price times quantity,
/// or 0 when no known product is selected.
#[must_use]
pub fn preview_total(products: &[product::Model], request: &SaleRequest) -> f64 {
    request
        .product_id
        .and_then(|id| products.iter().find(|p| p.id == id))
        .map_or(0.0, |p| {
            #[allow(clippy::cast_precision_loss)]
            let quantity = request.quantity.max(0) as f64;
            p.price * quantity
        })
}

/// Validates and applies a sale against the current inventory.
///
/// # Arguments
/// * `db` - Store connection
/// * `request` - Product selection and quantity from the sale form
/// * `timestamp` - When the sale happens (normally `Utc::now()`)
///
/// # Errors
/// Nothing is changed when any of these are returned:
/// - [`Error::NoProductSelected`] if the request has no product
/// - [`Error::InvalidQuantity`] if the quantity is below 1
/// - [`Error::ProductNotFound`] if the product is not in the inventory
/// - [`Error::InsufficientStock`] if the quantity exceeds current stock
#[instrument(skip(db))]
pub async fn record_sale(
    db: &DatabaseConnection,
    request: SaleRequest,
    timestamp: DateTime<Utc>,
) -> Result<sale::Model> {
    let product_id = request.product_id.ok_or(Error::NoProductSelected)?;
    if request.quantity < 1 {
        return Err(Error::InvalidQuantity {
            quantity: request.quantity,
        });
    }

    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if request.quantity > product.stock {
        warn!(
            product_id,
            requested = request.quantity,
            available = product.stock,
            "Sale rejected: not enough stock"
        );
        return Err(Error::InsufficientStock {
            requested: request.quantity,
            available: product.stock,
        });
    }

    decrement_stock(&txn, product_id, request.quantity).await?;

    #[allow(clippy::cast_precision_loss)]
    let total = product.price * request.quantity as f64;
    let sale = sale::ActiveModel {
        product_id: Set(product.id),
        product_name: Set(product.name.clone()),
        unit_price: Set(product.price),
        quantity: Set(request.quantity),
        total: Set(total),
        timestamp: Set(timestamp),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        sale_id = sale.id,
        product = %sale.product_name,
        quantity = sale.quantity,
        total = sale.total,
        "Sale completed"
    );
    Ok(sale)
}

/// Subtracts `quantity` from a product's stock in a single UPDATE that only
/// matches while enough stock remains.
async fn decrement_stock<C>(db: &C, product_id: i64, quantity: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let result = Product::update_many()
        .col_expr(
            product::Column::Stock,
            Expr::col(product::Column::Stock).sub(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .filter(product::Column::Stock.gte(quantity))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        let available = Product::find_by_id(product_id)
            .one(db)
            .await?
            .map_or(0, |p| p.stock);
        return Err(Error::InsufficientStock {
            requested: quantity,
            available,
        });
    }

    debug!(product_id, quantity, "Stock decremented");
    Ok(())
}

/// Inserts a historical sale without touching stock. Used for seed data.
pub async fn insert_sale_record<C>(
    db: &C,
    product: &product::Model,
    quantity: i64,
    timestamp: DateTime<Utc>,
) -> Result<sale::Model>
where
    C: ConnectionTrait,
{
    #[allow(clippy::cast_precision_loss)]
    let total = product.price * quantity as f64;
    sale::ActiveModel {
        product_id: Set(product.id),
        product_name: Set(product.name.clone()),
        unit_price: Set(product.price),
        quantity: Set(quantity),
        total: Set(total),
        timestamp: Set(timestamp),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all sales, newest first.
pub async fn get_all_sales<C>(db: &C) -> Result<Vec<sale::Model>>
where
    C: ConnectionTrait,
{
    Sale::find()
        .order_by_desc(sale::Column::Timestamp)
        .order_by_desc(sale::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves at most `limit` of the newest sales.
pub async fn get_recent_sales<C>(db: &C, limit: u64) -> Result<Vec<sale::Model>>
where
    C: ConnectionTrait,
{
    Sale::find()
        .order_by_desc(sale::Column::Timestamp)
        .order_by_desc(sale::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
