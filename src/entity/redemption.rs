use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{booking, voucher};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "voucher_redemptions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub code: String,
  pub guest_id: i64,
  pub booking_id: String,
  pub amount: i64,
  pub redeemed_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "voucher::Entity",
    from = "Column::Code",
    to = "voucher::Column::Code"
  )]
  Voucher,
  #[sea_orm(
    belongs_to = "booking::Entity",
    from = "Column::BookingId",
    to = "booking::Column::Id"
  )]
  Booking,
}

impl Related<voucher::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Voucher.def()
  }
}

impl Related<booking::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Booking.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
