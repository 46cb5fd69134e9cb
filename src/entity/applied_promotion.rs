use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::booking;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PromotionKind {
  #[sea_orm(string_value = "membership")]
  #[default]
  Membership,
  #[sea_orm(string_value = "promotion")]
  Promotion,
}

/// One line of the applied-promotions snapshot attached to a booking.
/// Rows are written once at finalization and never updated, so the
/// receipt stays correct even if the voucher is edited later.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applied_promotions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub booking_id: String,
  pub seq: i32,
  pub kind: PromotionKind,
  pub label: String,
  pub percent: Option<i32>,
  pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "booking::Entity",
    from = "Column::BookingId",
    to = "booking::Column::Id"
  )]
  Booking,
}

impl Related<booking::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Booking.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
