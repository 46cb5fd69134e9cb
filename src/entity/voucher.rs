use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::pricing::{Discount, VoucherTerms};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DiscountType {
  #[sea_orm(string_value = "percentage")]
  #[default]
  Percentage,
  #[sea_orm(string_value = "fixed_amount")]
  FixedAmount,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum VoucherSource {
  #[sea_orm(string_value = "admin")]
  #[default]
  Admin,
  #[sea_orm(string_value = "host")]
  Host,
  #[sea_orm(string_value = "loyalty")]
  Loyalty,
}

/// JSON-encoded restriction list. Empty means unrestricted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize, FromJsonQueryResult)]
pub struct ScopeList(pub Vec<String>);

impl ScopeList {
  pub fn permits(&self, value: &str) -> bool {
    self.0.is_empty() || self.0.iter().any(|s| s == value)
  }
}

impl<S: Into<String>> FromIterator<S> for ScopeList {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub code: String,
  pub discount_type: DiscountType,
  pub value: i64,
  pub max_discount: Option<i64>,
  pub min_booking_value: Option<i64>,
  pub max_uses: Option<i32>,
  pub max_uses_per_guest: Option<i32>,
  pub used_count: i32,
  pub allowed_tiers: ScopeList,
  pub listing_ids: ScopeList,
  pub property_types: ScopeList,
  pub valid_from: DateTime,
  pub valid_until: DateTime,
  pub stack_with_membership: bool,
  pub stack_with_promotions: bool,
  pub is_active: bool,
  pub source: VoucherSource,
  pub created_at: DateTime,
}

impl Model {
  /// The discount terms of this row as a tagged variant.
  pub fn discount(&self) -> Discount {
    match self.discount_type {
      DiscountType::Percentage => Discount::Percentage {
        percent: self.value as i32,
        cap: self.max_discount,
      },
      DiscountType::FixedAmount => Discount::Fixed { amount: self.value },
    }
  }

  /// The parts of this voucher the price composer works with.
  pub fn terms(&self) -> VoucherTerms {
    VoucherTerms {
      code: self.code.clone(),
      discount: self.discount(),
      stack_with_membership: self.stack_with_membership,
    }
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::redemption::Entity")]
  Redemptions,
}

impl Related<super::redemption::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Redemptions.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
