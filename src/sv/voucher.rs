use sea_orm::{Condition, sea_query::Expr};
use serde::Deserialize;

use crate::{
  entity::{DiscountType, ScopeList, VoucherSource, redemption, voucher},
  prelude::*,
};

/// Percentage values the issuing surfaces offer.
pub const PERCENT_CHOICES: [i64; 4] = [5, 10, 15, 20];

pub struct Voucher<'a> {
  db: &'a DatabaseConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVoucher {
  pub code: String,
  pub discount_type: DiscountType,
  pub value: i64,
  pub max_discount: Option<i64>,
  pub min_booking_value: Option<i64>,
  pub max_uses: Option<i32>,
  pub max_uses_per_guest: Option<i32>,
  #[serde(default)]
  pub allowed_tiers: ScopeList,
  #[serde(default)]
  pub listing_ids: ScopeList,
  #[serde(default)]
  pub property_types: ScopeList,
  pub valid_from: DateTime,
  pub valid_until: DateTime,
  #[serde(default = "default_stack_with_membership")]
  pub stack_with_membership: bool,
  #[serde(default)]
  pub stack_with_promotions: bool,
  #[serde(default)]
  pub source: VoucherSource,
}

fn default_stack_with_membership() -> bool {
  true
}

/// Checkout context a voucher is judged against. Everything the rules
/// need arrives here explicitly; there is no ambient session state.
#[derive(Debug, Clone)]
pub struct RedeemContext<'a> {
  pub room_subtotal: i64,
  pub membership_tier: Option<&'a str>,
  pub listing_id: &'a str,
  pub property_type: &'a str,
  /// This guest's prior finalized redemptions of the code.
  pub prior_uses: i64,
  /// The checkout already carries promotional discounts the voucher
  /// would have to coexist with.
  pub has_other_promotions: bool,
}

/// Rule checks in checkout order, first failure wins. Pure and free of
/// side effects: judging the same voucher against the same context
/// twice gives the same answer.
pub fn check(
  v: &voucher::Model,
  ctx: &RedeemContext<'_>,
  now: DateTime,
) -> Result<(), Reject> {
  if !v.is_active {
    return Err(Reject::Inactive);
  }
  if now < v.valid_from {
    return Err(Reject::NotYetValid);
  }
  if now > v.valid_until {
    return Err(Reject::Expired);
  }
  if let Some(min) = v.min_booking_value {
    if ctx.room_subtotal < min {
      return Err(Reject::BelowMinimumSpend);
    }
  }
  if let Some(max) = v.max_uses {
    if v.used_count >= max {
      return Err(Reject::Exhausted);
    }
  }
  if let Some(per_guest) = v.max_uses_per_guest {
    if ctx.prior_uses >= per_guest as i64 {
      return Err(Reject::PerGuestLimitReached);
    }
  }
  if !v.allowed_tiers.0.is_empty() {
    match ctx.membership_tier {
      Some(tier) if v.allowed_tiers.permits(tier) => {}
      _ => return Err(Reject::TierNotEligible),
    }
  }
  if !v.listing_ids.permits(ctx.listing_id)
    || !v.property_types.permits(ctx.property_type)
  {
    return Err(Reject::NotApplicableToListing);
  }
  if ctx.has_other_promotions && !v.stack_with_promotions {
    return Err(Reject::StackingConflict);
  }

  Ok(())
}

/// How many times this guest has redeemed the code on finalized
/// bookings.
pub async fn prior_uses<C: ConnectionTrait>(
  conn: &C,
  code: &str,
  guest_id: i64,
) -> Result<i64> {
  let count = redemption::Entity::find()
    .filter(redemption::Column::Code.eq(code))
    .filter(redemption::Column::GuestId.eq(guest_id))
    .count(conn)
    .await?;
  Ok(count as i64)
}

/// Takes one use of the voucher. The increment is conditional on the
/// cap, so two finalizations racing for the last use cannot both
/// succeed: the loser sees zero rows affected and gets `Exhausted`.
pub async fn redeem<C: ConnectionTrait>(conn: &C, code: &str) -> Result<()> {
  let res = voucher::Entity::update_many()
    .col_expr(
      voucher::Column::UsedCount,
      Expr::col(voucher::Column::UsedCount).add(1),
    )
    .filter(voucher::Column::Code.eq(code))
    .filter(
      Condition::any()
        .add(voucher::Column::MaxUses.is_null())
        .add(
          Expr::col(voucher::Column::UsedCount)
            .lt(Expr::col(voucher::Column::MaxUses)),
        ),
    )
    .exec(conn)
    .await?;

  if res.rows_affected == 0 {
    return Err(Error::Voucher(Reject::Exhausted));
  }

  Ok(())
}

impl<'a> Voucher<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, new: NewVoucher) -> Result<voucher::Model> {
    let code = new.code.trim().to_uppercase();
    if code.is_empty() {
      return Err(Error::InvalidArgs("Voucher code must not be empty".into()));
    }

    match new.discount_type {
      DiscountType::Percentage => {
        if !PERCENT_CHOICES.contains(&new.value) {
          return Err(Error::InvalidArgs(
            "Percentage must be 5, 10, 15 or 20".into(),
          ));
        }
      }
      DiscountType::FixedAmount => {
        if new.value <= 0 {
          return Err(Error::InvalidArgs(
            "Fixed amount must be positive".into(),
          ));
        }
      }
    }

    if new.valid_from > new.valid_until {
      return Err(Error::InvalidArgs(
        "Validity window must not end before it starts".into(),
      ));
    }

    let caps = [
      new.max_discount,
      new.min_booking_value,
      new.max_uses.map(i64::from),
      new.max_uses_per_guest.map(i64::from),
    ];
    if caps.iter().flatten().any(|&cap| cap <= 0) {
      return Err(Error::InvalidArgs("Caps must be positive when set".into()));
    }

    if voucher::Entity::find_by_id(code.as_str())
      .one(self.db)
      .await?
      .is_some()
    {
      return Err(Error::InvalidArgs("Voucher code already exists".into()));
    }

    let now = Utc::now().naive_utc();
    let voucher = voucher::ActiveModel {
      code: Set(code.clone()),
      discount_type: Set(new.discount_type),
      value: Set(new.value),
      max_discount: Set(new.max_discount),
      min_booking_value: Set(new.min_booking_value),
      max_uses: Set(new.max_uses),
      max_uses_per_guest: Set(new.max_uses_per_guest),
      used_count: Set(0),
      allowed_tiers: Set(new.allowed_tiers),
      listing_ids: Set(new.listing_ids),
      property_types: Set(new.property_types),
      valid_from: Set(new.valid_from),
      valid_until: Set(new.valid_until),
      stack_with_membership: Set(new.stack_with_membership),
      stack_with_promotions: Set(new.stack_with_promotions),
      is_active: Set(true),
      source: Set(new.source),
      created_at: Set(now),
    };

    let voucher = voucher.insert(self.db).await?;
    info!("created voucher {}", voucher.code);
    Ok(voucher)
  }

  pub async fn by_code(&self, code: &str) -> Result<Option<voucher::Model>> {
    let code = code.trim().to_uppercase();
    let voucher =
      voucher::Entity::find_by_id(code.as_str()).one(self.db).await?;
    Ok(voucher)
  }

  pub async fn list(&self) -> Result<Vec<voucher::Model>> {
    Ok(
      voucher::Entity::find()
        .order_by_desc(voucher::Column::CreatedAt)
        .all(self.db)
        .await?,
    )
  }

  /// Soft enable/disable. Vouchers are never hard-deleted once used;
  /// finalized bookings keep referring to them.
  pub async fn set_active(&self, code: &str, active: bool) -> Result<()> {
    let voucher =
      self.by_code(code).await?.ok_or(Error::VoucherNotFound)?;

    voucher::ActiveModel { is_active: Set(active), ..voucher.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  /// Loads the voucher and judges it against the checkout context.
  /// Read-only; the usage counter is only touched by `redeem`.
  pub async fn validate_for(
    &self,
    code: &str,
    ctx: &RedeemContext<'_>,
  ) -> Result<voucher::Model> {
    let voucher =
      self.by_code(code).await?.ok_or(Error::VoucherNotFound)?;

    check(&voucher, ctx, Utc::now().naive_utc())?;
    Ok(voucher)
  }
}
