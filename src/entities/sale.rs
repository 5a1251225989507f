//! Sale entity - An append-only record of a completed sale.
//!
//! The `product_id`, `product_name` and `unit_price` columns are a snapshot
//! taken at sale time. They are not a foreign key, so editing or deleting the
//! product later never changes a recorded sale.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier, assigned in increasing order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID the product had when it was sold
    pub product_id: i64,
    /// Product name at sale time
    pub product_name: String,
    /// Unit price at sale time
    pub unit_price: f64,
    /// Units sold, always positive
    pub quantity: i64,
    /// `unit_price * quantity`
    pub total: f64,
    /// When the sale happened
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
