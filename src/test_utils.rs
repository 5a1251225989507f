//! Shared test utilities for `StockBuddy`.
//!
//! This module provides helpers for setting up an in-memory store and building
//! products, sales and users with sensible defaults.

use crate::{
    config::users::{Role, UserConfig},
    core::product::{self, DEFAULT_IMAGE, ProductForm},
    entities,
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` store with all tables initialized.
/// This is the standard setup for all store-backed tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A filled-in product form with an empty image field.
pub fn product_form(name: &str, price: f64, stock: i64, threshold: i64) -> ProductForm {
    ProductForm {
        name: name.to_string(),
        price: Some(price),
        stock: Some(stock),
        threshold: Some(threshold),
        image: String::new(),
    }
}

/// Creates a product in the store through the normal validation path.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i64,
    threshold: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, &product_form(name, price, stock, threshold)).await
}

/// An unsaved product model.
///
/// # Defaults
/// * `threshold`: 5
/// * `image`: the placeholder image
pub fn product_model(id: i64, name: &str, price: f64, stock: i64) -> entities::product::Model {
    entities::product::Model {
        id,
        name: name.to_string(),
        price,
        stock,
        threshold: 5,
        image: DEFAULT_IMAGE.to_string(),
    }
}

/// An unsaved one-unit sale with the given total at `timestamp`.
pub fn sale_at(timestamp: DateTime<Utc>, total: f64) -> entities::sale::Model {
    entities::sale::Model {
        id: 0,
        product_id: 1,
        product_name: "Test Product".to_string(),
        unit_price: total,
        quantity: 1,
        total,
        timestamp,
    }
}

/// An unsaved sale of `quantity` units with the given total, timestamped now.
pub fn sale_of(quantity: i64, total: f64) -> entities::sale::Model {
    entities::sale::Model {
        quantity,
        ..sale_at(Utc::now(), total)
    }
}

pub fn user(name: &str, email: &str, role: Role) -> UserConfig {
    UserConfig {
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}
