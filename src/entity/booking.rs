use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{applied_promotion, guest};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub guest_id: i64,
  pub listing_id: String,
  pub property_type: String,
  pub base_price: i64,
  pub nights: i32,
  pub cleaning_fee: i64,
  pub service_fee: i64,
  pub membership_discount: i64,
  pub promotion_discount: i64,
  pub total_price: i64,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "guest::Entity",
    from = "Column::GuestId",
    to = "guest::Column::GuestId"
  )]
  Guest,
  #[sea_orm(has_many = "applied_promotion::Entity")]
  AppliedPromotions,
}

impl Related<guest::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Guest.def()
  }
}

impl Related<applied_promotion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::AppliedPromotions.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
