use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::booking;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub guest_id: i64,
  pub membership_tier: Option<String>,
  pub joined_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "booking::Entity")]
  Bookings,
}

impl Related<booking::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Bookings.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
