//! Database configuration module for `FinanceBuddy`.
//!
//! This module handles the `SQLite` document store connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the store layout always matches the Rust structs.

use crate::entities::{Entry, UserProfile};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/finance_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the default path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the store named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `lancamentos` and `users` tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut entry_table = schema.create_table_from_entity(Entry);
    let mut profile_table = schema.create_table_from_entity(UserProfile);

    entry_table.if_not_exists();
    profile_table.if_not_exists();

    db.execute(builder.build(&entry_table)).await?;
    db.execute(builder.build(&profile_table)).await?;

    Ok(())
}
