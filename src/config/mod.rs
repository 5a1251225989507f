/// In-memory store connection and table creation
pub mod database;

/// Seed data loading from config.toml
pub mod seed;

/// Mock user directory and session selection
pub mod users;
