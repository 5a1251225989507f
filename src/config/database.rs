//! In-memory store setup.
//!
//! The store is an `SQLite` database opened with `sqlite::memory:`, so it lives
//! exactly as long as the process. Tables are generated from the SeaORM
//! entities with `Schema::create_table_from_entity`, keeping the schema in
//! step with the Rust structs.

use crate::entities::{Product, Sale};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Store URL used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the store URL from the `DATABASE_URL` environment variable, falling
/// back to an in-memory `SQLite` database.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Opens the store and creates its tables.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    let db = Database::connect(&database_url).await?;
    create_tables(&db).await?;

    info!(url = %database_url, "Store ready");
    Ok(db)
}

/// Creates the products and sales tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let product_table = schema.create_table_from_entity(Product);
    let sale_table = schema.create_table_from_entity(Sale);

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&sale_table)).await?;

    Ok(())
}
