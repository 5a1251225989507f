//! Unified error type for `StockBuddy`.
//!
//! Validation variants carry the message shown inline next to the form that
//! raised them. Everything else is infrastructure and propagates to `main`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Please fill in all required fields")]
    MissingFields { fields: Vec<&'static str> },

    #[error("Price must be a non-negative number (got {price})")]
    InvalidPrice { price: f64 },

    #[error("{field} cannot be negative (got {value})")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("Quantity must be at least 1 (got {quantity})")]
    InvalidQuantity { quantity: i64 },

    #[error("Please select a product")]
    NoProductSelected,

    #[error("Product not found")]
    ProductNotFound { id: i64 },

    #[error("Not enough stock available")]
    InsufficientStock { requested: i64, available: i64 },
}

impl Error {
    /// True for failures caused by user input rather than the store or the
    /// environment. Views render these inline and carry on.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFields { .. }
                | Self::InvalidPrice { .. }
                | Self::NegativeCount { .. }
                | Self::InvalidQuantity { .. }
                | Self::NoProductSelected
                | Self::ProductNotFound { .. }
                | Self::InsufficientStock { .. }
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
