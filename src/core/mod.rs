//! Core business logic - framework-agnostic inventory, sales and reporting operations.

/// Sales chart bucketing
pub mod aggregation;
/// Stat card and low-stock metrics
pub mod metrics;
/// Product CRUD and stock status
pub mod product;
/// Sale admission and sales history
pub mod sale;
/// Loading seed data into the store
pub mod seed;
/// User directory statistics
pub mod users;
