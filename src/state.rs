use migration::Migrator;

use crate::prelude::*;

pub struct AppState {
  pub db: DatabaseConnection,
  pub admin_token: String,
}

impl AppState {
  pub async fn new(db_url: &str, admin_token: &str) -> anyhow::Result<Self> {
    let db = Database::connect(db_url).await?;
    Migrator::up(&db, None).await?;
    info!("database ready at {db_url}");

    Ok(Self { db, admin_token: admin_token.to_string() })
  }
}
