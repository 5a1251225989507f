//! Product entity - Represents an item held in inventory.
//!
//! Each product has a name, unit price, current stock, a low-stock threshold
//! and an image reference used by the inventory table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier, assigned as one past the current highest ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name (e.g., "Wireless Mouse")
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Units currently on hand, never negative
    pub stock: i64,
    /// Stock level at or below which the product counts as low stock
    pub threshold: i64,
    /// Image URL shown next to the product name
    pub image: String,
}

/// Products are not related to sales: sales keep their own snapshot.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
