use serde::Deserialize;
use uuid::Uuid;

use crate::{
  entity::{applied_promotion, booking, redemption, voucher},
  prelude::*,
  pricing::{self, Charges, Quote},
  sv,
  utils::format_vnd,
};

pub struct Booking<'a> {
  db: &'a DatabaseConnection,
}

/// Checkout input for a quote or a finalization.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
  pub guest_id: i64,
  pub listing_id: String,
  pub property_type: String,
  #[serde(flatten)]
  pub charges: Charges,
  pub voucher_code: Option<String>,
  #[serde(default)]
  pub has_other_promotions: bool,
}

fn check_charges(charges: &Charges) -> Result<()> {
  if charges.base_price < 0
    || charges.cleaning_fee < 0
    || charges.service_fee < 0
  {
    return Err(Error::InvalidArgs("Charges must not be negative".into()));
  }
  if charges.nights <= 0 {
    return Err(Error::InvalidArgs("Night count must be positive".into()));
  }
  Ok(())
}

impl<'a> Booking<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Prices a booking without side effects. A rejected voucher never
  /// changes the price: the quote comes back computed without it,
  /// together with the reason, so the guest can try another code or
  /// proceed as-is.
  pub async fn quote(
    &self,
    req: &BookingRequest,
  ) -> Result<(Quote, Option<Error>)> {
    check_charges(&req.charges)?;

    let guest = sv::Guest::new(self.db).get_or_create(req.guest_id).await?;
    let benefit = sv::Membership::new(self.db).benefit_for(&guest).await?;

    let mut terms = None;
    let mut rejection = None;
    if let Some(code) = &req.voucher_code {
      let ctx = sv::voucher::RedeemContext {
        room_subtotal: req.charges.room_subtotal(),
        membership_tier: guest.membership_tier.as_deref(),
        listing_id: &req.listing_id,
        property_type: &req.property_type,
        prior_uses: sv::voucher::prior_uses(
          self.db,
          code.trim().to_uppercase().as_str(),
          guest.guest_id,
        )
        .await?,
        has_other_promotions: req.has_other_promotions,
      };

      match sv::Voucher::new(self.db).validate_for(code, &ctx).await {
        Ok(voucher) => terms = Some(voucher.terms()),
        Err(err @ (Error::Voucher(_) | Error::VoucherNotFound)) => {
          rejection = Some(err);
        }
        Err(err) => return Err(err),
      }
    }

    let quote =
      pricing::compose(&req.charges, benefit.as_ref(), terms.as_ref());
    Ok((quote, rejection))
  }

  /// Finalizes a booking: one transaction that re-validates the
  /// voucher, takes a use of it, and writes the booking with its
  /// applied-promotions snapshot. The usage counter moves here and
  /// nowhere else, so abandoning a quoted checkout releases nothing
  /// and a failed finalization rolls back whole.
  pub async fn finalize(
    &self,
    req: &BookingRequest,
  ) -> Result<(booking::Model, Vec<applied_promotion::Model>)> {
    check_charges(&req.charges)?;

    let guest = sv::Guest::new(self.db).get_or_create(req.guest_id).await?;
    let benefit = sv::Membership::new(self.db).benefit_for(&guest).await?;

    let txn = self.db.begin().await?;

    let mut terms = None;
    if let Some(code) = &req.voucher_code {
      let code = code.trim().to_uppercase();
      let voucher = voucher::Entity::find_by_id(code.as_str())
        .one(&txn)
        .await?
        .ok_or(Error::VoucherNotFound)?;

      let ctx = sv::voucher::RedeemContext {
        room_subtotal: req.charges.room_subtotal(),
        membership_tier: guest.membership_tier.as_deref(),
        listing_id: &req.listing_id,
        property_type: &req.property_type,
        prior_uses: sv::voucher::prior_uses(&txn, &code, guest.guest_id)
          .await?,
        has_other_promotions: req.has_other_promotions,
      };
      sv::voucher::check(&voucher, &ctx, Utc::now().naive_utc())?;

      terms = Some(voucher.terms());
    }

    let quote =
      pricing::compose(&req.charges, benefit.as_ref(), terms.as_ref());

    // A voucher that lost the stacking resolution is not applied and
    // must not consume a use.
    let redeemed_code = match &terms {
      Some(terms) if quote.promotion_discount > 0 => {
        sv::voucher::redeem(&txn, &terms.code).await?;
        Some(terms.code.clone())
      }
      _ => None,
    };

    let now = Utc::now().naive_utc();
    let id = Uuid::new_v4().to_string();

    let booking = booking::ActiveModel {
      id: Set(id.clone()),
      guest_id: Set(guest.guest_id),
      listing_id: Set(req.listing_id.clone()),
      property_type: Set(req.property_type.clone()),
      base_price: Set(req.charges.base_price),
      nights: Set(req.charges.nights),
      cleaning_fee: Set(req.charges.cleaning_fee),
      service_fee: Set(req.charges.service_fee),
      membership_discount: Set(quote.membership_discount),
      promotion_discount: Set(quote.promotion_discount),
      total_price: Set(quote.total_price),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let mut snapshot = Vec::with_capacity(quote.applied.len());
    for (seq, entry) in quote.applied.iter().enumerate() {
      let line = applied_promotion::ActiveModel {
        id: NotSet,
        booking_id: Set(id.clone()),
        seq: Set(seq as i32),
        kind: Set(entry.kind.clone()),
        label: Set(entry.label.clone()),
        percent: Set(entry.percent),
        amount: Set(entry.amount),
      }
      .insert(&txn)
      .await?;
      snapshot.push(line);
    }

    if let Some(code) = redeemed_code {
      redemption::ActiveModel {
        id: NotSet,
        code: Set(code),
        guest_id: Set(guest.guest_id),
        booking_id: Set(id.clone()),
        amount: Set(quote.promotion_discount),
        redeemed_at: Set(now),
      }
      .insert(&txn)
      .await?;
    }

    txn.commit().await?;
    info!(
      "finalized booking {} for {}",
      booking.id,
      format_vnd(booking.total_price)
    );

    Ok((booking, snapshot))
  }

  /// A finalized booking with its snapshot lines, for receipt display.
  pub async fn receipt(
    &self,
    id: &str,
  ) -> Result<(booking::Model, Vec<applied_promotion::Model>)> {
    let booking = booking::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::BookingNotFound)?;

    let lines = applied_promotion::Entity::find()
      .filter(applied_promotion::Column::BookingId.eq(id))
      .order_by_asc(applied_promotion::Column::Seq)
      .all(self.db)
      .await?;

    Ok((booking, lines))
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeDelta;

  use super::*;
  use crate::{
    entity::{DiscountType, PromotionKind},
    sv::{test_utils::test_db, voucher::NewVoucher},
  };

  fn request(guest_id: i64, code: Option<&str>) -> BookingRequest {
    BookingRequest {
      guest_id,
      listing_id: "lst-1".into(),
      property_type: "villa".into(),
      charges: Charges {
        base_price: 1_000_000,
        nights: 3,
        cleaning_fee: 300_000,
        service_fee: 150_000,
      },
      voucher_code: code.map(Into::into),
      has_other_promotions: false,
    }
  }

  fn fixed_voucher(code: &str, amount: i64) -> NewVoucher {
    let now = Utc::now().naive_utc();
    NewVoucher {
      code: code.into(),
      discount_type: DiscountType::FixedAmount,
      value: amount,
      max_discount: None,
      min_booking_value: None,
      max_uses: None,
      max_uses_per_guest: None,
      allowed_tiers: Default::default(),
      listing_ids: Default::default(),
      property_types: Default::default(),
      valid_from: now - TimeDelta::hours(1),
      valid_until: now + TimeDelta::days(30),
      stack_with_membership: true,
      stack_with_promotions: false,
      source: Default::default(),
    }
  }

  #[tokio::test]
  async fn test_finalize_writes_booking_and_snapshot() {
    let db = test_db::setup().await;

    sv::Membership::new(&db).upsert_plan("gold", 10, false).await.unwrap();
    sv::Guest::new(&db).get_or_create(42).await.unwrap();
    sv::Guest::new(&db).set_tier(42, Some("gold".into())).await.unwrap();
    sv::Voucher::new(&db)
      .create(fixed_voucher("LUXE200", 200_000))
      .await
      .unwrap();

    let (booking, snapshot) = Booking::new(&db)
      .finalize(&request(42, Some("LUXE200")))
      .await
      .unwrap();

    assert_eq!(booking.membership_discount, 300_000);
    assert_eq!(booking.promotion_discount, 200_000);
    assert_eq!(booking.total_price, 3_000_000 - 500_000 + 450_000);

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].kind, PromotionKind::Membership);
    assert_eq!(snapshot[0].label, "gold");
    assert_eq!(snapshot[1].kind, PromotionKind::Promotion);
    assert_eq!(snapshot[1].label, "LUXE200");
    assert_eq!(snapshot[1].amount, 200_000);

    let voucher =
      sv::Voucher::new(&db).by_code("LUXE200").await.unwrap().unwrap();
    assert_eq!(voucher.used_count, 1);
  }

  #[tokio::test]
  async fn test_finalize_admits_exactly_max_uses() {
    let db = test_db::setup().await;

    let mut new = fixed_voucher("SCARCE", 100_000);
    new.max_uses = Some(2);
    sv::Voucher::new(&db).create(new).await.unwrap();

    let bookings = Booking::new(&db);
    bookings.finalize(&request(1, Some("SCARCE"))).await.unwrap();
    bookings.finalize(&request(2, Some("SCARCE"))).await.unwrap();
    let result = bookings.finalize(&request(3, Some("SCARCE"))).await;

    assert!(matches!(result, Err(Error::Voucher(Reject::Exhausted))));

    let voucher =
      sv::Voucher::new(&db).by_code("SCARCE").await.unwrap().unwrap();
    assert_eq!(voucher.used_count, 2);

    // the failed attempt left no booking behind
    let bookings = booking::Entity::find().all(&db).await.unwrap();
    assert_eq!(bookings.len(), 2);
  }

  #[tokio::test]
  async fn test_finalize_enforces_per_guest_limit() {
    let db = test_db::setup().await;

    let mut new = fixed_voucher("ONEEACH", 100_000);
    new.max_uses_per_guest = Some(1);
    sv::Voucher::new(&db).create(new).await.unwrap();

    let bookings = Booking::new(&db);
    bookings.finalize(&request(42, Some("ONEEACH"))).await.unwrap();

    let result = bookings.finalize(&request(42, Some("ONEEACH"))).await;
    assert!(matches!(
      result,
      Err(Error::Voucher(Reject::PerGuestLimitReached))
    ));

    // a different guest still gets through
    bookings.finalize(&request(7, Some("ONEEACH"))).await.unwrap();
  }

  #[tokio::test]
  async fn test_rejected_voucher_leaves_no_trace() {
    let db = test_db::setup().await;

    let mut new = fixed_voucher("BIGSPEND", 100_000);
    new.min_booking_value = Some(5_000_000);
    sv::Voucher::new(&db).create(new).await.unwrap();

    let result =
      Booking::new(&db).finalize(&request(42, Some("BIGSPEND"))).await;
    assert!(matches!(
      result,
      Err(Error::Voucher(Reject::BelowMinimumSpend))
    ));

    let voucher =
      sv::Voucher::new(&db).by_code("BIGSPEND").await.unwrap().unwrap();
    assert_eq!(voucher.used_count, 0);
    assert!(booking::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(redemption::Entity::find().all(&db).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_quote_reports_rejection_with_unchanged_price() {
    let db = test_db::setup().await;

    let mut new = fixed_voucher("BIGSPEND", 100_000);
    new.min_booking_value = Some(5_000_000);
    sv::Voucher::new(&db).create(new).await.unwrap();

    let bookings = Booking::new(&db);
    let (plain, none) = bookings.quote(&request(42, None)).await.unwrap();
    assert!(none.is_none());

    let (quote, rejection) =
      bookings.quote(&request(42, Some("BIGSPEND"))).await.unwrap();

    assert!(matches!(
      rejection,
      Some(Error::Voucher(Reject::BelowMinimumSpend))
    ));
    assert_eq!(quote, plain);

    // quoting twice mutates nothing
    let voucher =
      sv::Voucher::new(&db).by_code("BIGSPEND").await.unwrap().unwrap();
    assert_eq!(voucher.used_count, 0);
  }

  #[tokio::test]
  async fn test_quote_reports_unknown_code() {
    let db = test_db::setup().await;

    let (quote, rejection) = Booking::new(&db)
      .quote(&request(42, Some("NOPE")))
      .await
      .unwrap();

    assert!(matches!(rejection, Some(Error::VoucherNotFound)));
    assert_eq!(quote.promotion_discount, 0);
  }

  #[tokio::test]
  async fn test_losing_voucher_consumes_no_use() {
    let db = test_db::setup().await;

    sv::Membership::new(&db).upsert_plan("gold", 20, false).await.unwrap();
    sv::Guest::new(&db).get_or_create(42).await.unwrap();
    sv::Guest::new(&db).set_tier(42, Some("gold".into())).await.unwrap();

    // 100k voucher loses to the 600k membership discount
    let mut new = fixed_voucher("SMALL", 100_000);
    new.stack_with_membership = false;
    sv::Voucher::new(&db).create(new).await.unwrap();

    let (booking, snapshot) = Booking::new(&db)
      .finalize(&request(42, Some("SMALL")))
      .await
      .unwrap();

    assert_eq!(booking.membership_discount, 600_000);
    assert_eq!(booking.promotion_discount, 0);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].kind, PromotionKind::Membership);

    let voucher =
      sv::Voucher::new(&db).by_code("SMALL").await.unwrap().unwrap();
    assert_eq!(voucher.used_count, 0);
    assert!(redemption::Entity::find().all(&db).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_receipt_returns_ordered_snapshot() {
    let db = test_db::setup().await;

    sv::Membership::new(&db).upsert_plan("gold", 10, false).await.unwrap();
    sv::Guest::new(&db).get_or_create(42).await.unwrap();
    sv::Guest::new(&db).set_tier(42, Some("gold".into())).await.unwrap();
    sv::Voucher::new(&db)
      .create(fixed_voucher("LUXE200", 200_000))
      .await
      .unwrap();

    let bookings = Booking::new(&db);
    let (booking, _) =
      bookings.finalize(&request(42, Some("LUXE200"))).await.unwrap();

    let (found, lines) = bookings.receipt(&booking.id).await.unwrap();
    assert_eq!(found, booking);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].seq < lines[1].seq);
    assert_eq!(lines[0].kind, PromotionKind::Membership);
  }

  #[tokio::test]
  async fn test_receipt_unknown_booking() {
    let db = test_db::setup().await;

    let result = Booking::new(&db).receipt("missing").await;

    assert!(matches!(result, Err(Error::BookingNotFound)));
  }

  #[tokio::test]
  async fn test_finalize_rejects_bad_charges() {
    let db = test_db::setup().await;

    let mut req = request(42, None);
    req.charges.nights = 0;
    let result = Booking::new(&db).finalize(&req).await;

    assert!(matches!(result, Err(Error::InvalidArgs(_))));
  }
}
