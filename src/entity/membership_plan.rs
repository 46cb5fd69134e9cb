use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A subscription tier and the recurring booking benefit it grants.
/// The per-booking discount entry is derived from this row at quote
/// time and never persisted on its own.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "membership_plans")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub tier: String,
  pub discount_percent: i32,
  pub covers_services: bool,
  pub is_active: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
