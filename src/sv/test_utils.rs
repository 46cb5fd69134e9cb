//! Shared test utilities for database setup

#[cfg(test)]
pub mod test_db {
  use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema,
  };

  use crate::entity::*;

  /// Creates an in-memory SQLite database with all required tables
  pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    // Create guest table
    let stmt = schema.create_table_from_entity(guest::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    // Create membership plan table
    let stmt = schema.create_table_from_entity(membership_plan::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    // Create voucher table
    let stmt = schema.create_table_from_entity(voucher::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    // Create booking table
    let stmt = schema.create_table_from_entity(booking::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    // Create applied promotion table
    let stmt = schema.create_table_from_entity(applied_promotion::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    // Create redemption table
    let stmt = schema.create_table_from_entity(redemption::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }
}
