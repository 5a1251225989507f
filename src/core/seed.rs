//! Loads the seed inventory and sales history into a fresh store.

use crate::{
    config::seed::Config,
    core::{product::DEFAULT_IMAGE, sale::insert_sale_record},
    entities::{Product, product},
    errors::{Error, Result},
};
use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// What was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub sales: usize,
}

/// Inserts seed products with their configured IDs, then seed sales
/// positioned `hours_ago` before `now`. Seed sales are history and do not
/// consume stock.
///
/// Everything runs in one transaction; a bad seed entry leaves the store empty.
///
/// # Errors
/// Returns [`Error::Config`] for duplicate product IDs, invalid product
/// fields, sales naming an unknown product or a non-positive quantity.
#[instrument(skip(db, config))]
pub async fn seed_store(
    db: &DatabaseConnection,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<SeedReport> {
    info!(
        "Seeding store: {} products, {} sales from config",
        config.products.len(),
        config.sales.len()
    );

    let txn = db.begin().await?;
    let mut seeded: HashMap<i64, product::Model> = HashMap::new();

    for seed in &config.products {
        if seeded.contains_key(&seed.id) {
            return Err(seed_error(format!("duplicate product id {}", seed.id)));
        }
        if seed.name.trim().is_empty()
            || !seed.price.is_finite()
            || seed.price < 0.0
            || seed.stock < 0
            || seed.threshold < 0
        {
            return Err(seed_error(format!("invalid fields for product {}", seed.id)));
        }

        let model = product::ActiveModel {
            id: Set(seed.id),
            name: Set(seed.name.trim().to_string()),
            price: Set(seed.price),
            stock: Set(seed.stock),
            threshold: Set(seed.threshold),
            image: Set(seed
                .image
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string())),
        };
        Product::insert(model).exec(&txn).await?;

        let stored = Product::find_by_id(seed.id)
            .one(&txn)
            .await?
            .ok_or_else(|| seed_error(format!("product {} missing after insert", seed.id)))?;
        debug!(product_id = stored.id, name = %stored.name, "Seeded product");
        seeded.insert(seed.id, stored);
    }

    for seed in &config.sales {
        let product = seeded.get(&seed.product_id).ok_or_else(|| {
            seed_error(format!("sale refers to unknown product {}", seed.product_id))
        })?;
        if seed.quantity < 1 {
            return Err(seed_error(format!(
                "sale of product {} has quantity {}",
                seed.product_id, seed.quantity
            )));
        }

        let timestamp = now - TimeDelta::hours(seed.hours_ago);
        insert_sale_record(&txn, product, seed.quantity, timestamp).await?;
    }

    txn.commit().await?;

    let report = SeedReport {
        products: config.products.len(),
        sales: config.sales.len(),
    };
    info!(?report, "Store seeded");
    Ok(report)
}

fn seed_error(message: String) -> Error {
    Error::Config {
        message: format!("Invalid seed data: {message}"),
    }
}
