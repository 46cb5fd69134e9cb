//! Pure price composition: discount amounts, stacking, and totals.
//!
//! All amounts are whole VND (the đồng has no subunit). Nothing here
//! touches the database; the checkout context arrives as explicit
//! parameters and the result carries the applied-promotions snapshot.

use serde::{Deserialize, Serialize};

use crate::entity::PromotionKind;

/// Round-half-up percentage of an amount, in whole đồng. The same
/// helper backs both calculation and display, so a quoted price never
/// differs from the charged one by a rounding unit.
pub fn percent_of(amount: i64, percent: i32) -> i64 {
  (amount * percent as i64 + 50) / 100
}

/// Discount terms carried by a voucher, tagged by kind. A percentage
/// may carry a cap; a fixed amount never exceeds the base it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discount {
  Percentage { percent: i32, cap: Option<i64> },
  Fixed { amount: i64 },
}

impl Discount {
  /// The monetary discount this yields against `base`.
  pub fn amount_on(&self, base: i64) -> i64 {
    match *self {
      Discount::Percentage { percent, cap } => {
        let raw = percent_of(base, percent);
        cap.map_or(raw, |cap| raw.min(cap)).min(base)
      }
      Discount::Fixed { amount } => amount.min(base),
    }
  }

  /// The rate used, for the snapshot. Fixed amounts have none.
  pub fn percent(&self) -> Option<i32> {
    match *self {
      Discount::Percentage { percent, .. } => Some(percent),
      Discount::Fixed { .. } => None,
    }
  }
}

/// Membership benefit resolved from the guest's plan for one booking.
/// Computed per booking, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipBenefit {
  pub tier: String,
  pub percent: i32,
  pub covers_services: bool,
}

/// The parts of a validated voucher that matter for composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherTerms {
  pub code: String,
  pub discount: Discount,
  pub stack_with_membership: bool,
}

/// Charges of a booking before any discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
  pub base_price: i64,
  pub nights: i32,
  pub cleaning_fee: i64,
  pub service_fee: i64,
}

impl Charges {
  pub fn room_subtotal(&self) -> i64 {
    self.base_price * self.nights as i64
  }
}

/// One resolved discount line, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedEntry {
  pub kind: PromotionKind,
  pub label: String,
  pub percent: Option<i32>,
  pub amount: i64,
}

/// A fully composed price with its snapshot lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
  pub room_subtotal: i64,
  pub membership_discount: i64,
  pub promotion_discount: i64,
  pub cleaning_fee: i64,
  pub service_fee: i64,
  pub total_price: i64,
  pub applied: Vec<AppliedEntry>,
}

/// Composes the final price from charges, an optional membership
/// benefit, and zero or one validated voucher.
///
/// Stacking rules:
/// - the membership discount is computed first, against the room
///   subtotal (plus the service fee when the plan covers services);
/// - the voucher is computed against the room subtotal, never against
///   the membership-discounted amount;
/// - when the voucher does not stack with memberships, the single
///   larger discount applies, the voucher winning ties;
/// - the combined discount is clamped to the room subtotal, so the
///   total never drops below the fees.
pub fn compose(
  charges: &Charges,
  membership: Option<&MembershipBenefit>,
  voucher: Option<&VoucherTerms>,
) -> Quote {
  let room = charges.room_subtotal();

  let mut membership_amount = membership.map_or(0, |m| {
    let base =
      room + if m.covers_services { charges.service_fee } else { 0 };
    percent_of(base, m.percent)
  });

  let mut voucher_amount =
    voucher.map_or(0, |v| v.discount.amount_on(room));

  if let Some(v) = voucher {
    if membership.is_some() && !v.stack_with_membership {
      if voucher_amount >= membership_amount {
        membership_amount = 0;
      } else {
        voucher_amount = 0;
      }
    }
  }

  membership_amount = membership_amount.min(room);
  voucher_amount = voucher_amount.min(room - membership_amount);

  let mut applied = Vec::new();
  if let Some(m) = membership {
    if membership_amount > 0 {
      applied.push(AppliedEntry {
        kind: PromotionKind::Membership,
        label: m.tier.clone(),
        percent: Some(m.percent),
        amount: membership_amount,
      });
    }
  }
  if let Some(v) = voucher {
    if voucher_amount > 0 {
      applied.push(AppliedEntry {
        kind: PromotionKind::Promotion,
        label: v.code.clone(),
        percent: v.discount.percent(),
        amount: voucher_amount,
      });
    }
  }

  Quote {
    room_subtotal: room,
    membership_discount: membership_amount,
    promotion_discount: voucher_amount,
    cleaning_fee: charges.cleaning_fee,
    service_fee: charges.service_fee,
    total_price: room - membership_amount - voucher_amount
      + charges.cleaning_fee
      + charges.service_fee,
    applied,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn charges(base_price: i64, nights: i32) -> Charges {
    Charges { base_price, nights, cleaning_fee: 300_000, service_fee: 150_000 }
  }

  fn gold(percent: i32) -> MembershipBenefit {
    MembershipBenefit {
      tier: "gold".into(),
      percent,
      covers_services: false,
    }
  }

  fn voucher(discount: Discount, stack: bool) -> VoucherTerms {
    VoucherTerms {
      code: "LUXE10".into(),
      discount,
      stack_with_membership: stack,
    }
  }

  #[test]
  fn test_percent_rounds_half_up() {
    assert_eq!(percent_of(30, 5), 2); // 1.5 rounds up
    assert_eq!(percent_of(1_001, 10), 100); // 100.1 rounds down
    assert_eq!(percent_of(999, 5), 50); // 49.95 rounds up
    assert_eq!(percent_of(0, 20), 0);
  }

  #[test]
  fn test_percentage_clamped_to_cap() {
    let d = Discount::Percentage { percent: 10, cap: Some(500_000) };
    assert_eq!(d.amount_on(6_000_000), 500_000);
    assert_eq!(d.amount_on(3_000_000), 300_000);
  }

  #[test]
  fn test_fixed_never_exceeds_base() {
    let d = Discount::Fixed { amount: 800_000 };
    assert_eq!(d.amount_on(500_000), 500_000);
    assert_eq!(d.amount_on(2_000_000), 800_000);
  }

  #[test]
  fn test_membership_and_voucher_stack() {
    let quote = compose(
      &charges(1_000_000, 3),
      Some(&gold(10)),
      Some(&voucher(Discount::Fixed { amount: 200_000 }, true)),
    );

    assert_eq!(quote.membership_discount, 300_000);
    assert_eq!(quote.promotion_discount, 200_000);
    assert_eq!(quote.total_price, 3_000_000 - 500_000 + 450_000);
    assert_eq!(quote.applied.len(), 2);
    assert_eq!(quote.applied[0].kind, PromotionKind::Membership);
    assert_eq!(quote.applied[1].label, "LUXE10");
  }

  #[test]
  fn test_no_stack_keeps_larger_discount() {
    // membership 20% of 3M = 600k beats a 200k voucher
    let quote = compose(
      &charges(1_000_000, 3),
      Some(&gold(20)),
      Some(&voucher(Discount::Fixed { amount: 200_000 }, false)),
    );
    assert_eq!(quote.membership_discount, 600_000);
    assert_eq!(quote.promotion_discount, 0);
    assert_eq!(quote.applied.len(), 1);

    // 800k voucher beats membership 20%
    let quote = compose(
      &charges(1_000_000, 3),
      Some(&gold(20)),
      Some(&voucher(Discount::Fixed { amount: 800_000 }, false)),
    );
    assert_eq!(quote.membership_discount, 0);
    assert_eq!(quote.promotion_discount, 800_000);
  }

  #[test]
  fn test_no_stack_tie_goes_to_voucher() {
    let quote = compose(
      &charges(1_000_000, 3),
      Some(&gold(10)),
      Some(&voucher(Discount::Fixed { amount: 300_000 }, false)),
    );
    assert_eq!(quote.membership_discount, 0);
    assert_eq!(quote.promotion_discount, 300_000);
  }

  #[test]
  fn test_voucher_computed_on_room_not_discounted_amount() {
    let quote = compose(
      &charges(1_000_000, 3),
      Some(&gold(10)),
      Some(&voucher(Discount::Percentage { percent: 10, cap: None }, true)),
    );
    // 10% of 3M, not 10% of 2.7M
    assert_eq!(quote.promotion_discount, 300_000);
  }

  #[test]
  fn test_covers_services_widens_membership_base() {
    let benefit = MembershipBenefit {
      tier: "platinum".into(),
      percent: 10,
      covers_services: true,
    };
    let quote = compose(&charges(1_000_000, 3), Some(&benefit), None);
    // 10% of room 3M + service fee 150k
    assert_eq!(quote.membership_discount, 315_000);
  }

  #[test]
  fn test_combined_discount_clamped_to_room_subtotal() {
    let quote = compose(
      &charges(100_000, 1),
      Some(&gold(20)),
      Some(&voucher(Discount::Fixed { amount: 5_000_000 }, true)),
    );
    assert_eq!(
      quote.membership_discount + quote.promotion_discount,
      quote.room_subtotal
    );
    assert_eq!(quote.total_price, quote.cleaning_fee + quote.service_fee);
  }

  #[test]
  fn test_total_never_below_fee_floor() {
    for amount in [0, 50_000, 100_000, 10_000_000] {
      let quote = compose(
        &charges(100_000, 2),
        None,
        Some(&voucher(Discount::Fixed { amount }, true)),
      );
      assert!(quote.total_price >= quote.cleaning_fee + quote.service_fee);
    }
  }

  #[test]
  fn test_zero_amount_entries_left_out_of_snapshot() {
    let quote = compose(
      &charges(1_000_000, 2),
      None,
      Some(&voucher(Discount::Fixed { amount: 0 }, true)),
    );
    assert!(quote.applied.is_empty());
    assert_eq!(quote.total_price, 2_000_000 + 450_000);
  }
}
