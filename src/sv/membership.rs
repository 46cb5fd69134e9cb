use crate::{
  entity::{guest, membership_plan},
  prelude::*,
  pricing::MembershipBenefit,
};

pub struct Membership<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Membership<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn upsert_plan(
    &self,
    tier: &str,
    discount_percent: i32,
    covers_services: bool,
  ) -> Result<membership_plan::Model> {
    let tier = tier.trim().to_lowercase();
    if tier.is_empty() {
      return Err(Error::InvalidArgs("Tier name must not be empty".into()));
    }
    if !(0..=100).contains(&discount_percent) {
      return Err(Error::InvalidArgs(
        "Discount percent must be between 0 and 100".into(),
      ));
    }

    if let Some(plan) =
      membership_plan::Entity::find_by_id(tier.as_str()).one(self.db).await?
    {
      let updated = membership_plan::ActiveModel {
        discount_percent: Set(discount_percent),
        covers_services: Set(covers_services),
        is_active: Set(true),
        ..plan.into()
      }
      .update(self.db)
      .await?;
      return Ok(updated);
    }

    let now = Utc::now().naive_utc();
    let plan = membership_plan::ActiveModel {
      tier: Set(tier),
      discount_percent: Set(discount_percent),
      covers_services: Set(covers_services),
      is_active: Set(true),
      created_at: Set(now),
    };

    Ok(plan.insert(self.db).await?)
  }

  #[allow(dead_code)]
  pub async fn set_active(&self, tier: &str, active: bool) -> Result<()> {
    let plan = membership_plan::Entity::find_by_id(tier.trim().to_lowercase())
      .one(self.db)
      .await?
      .ok_or(Error::PlanNotFound)?;

    membership_plan::ActiveModel { is_active: Set(active), ..plan.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  /// The benefit this guest carries into a booking, derived from their
  /// tier's plan at this moment. Guests without a tier, or on a
  /// disabled plan, get none.
  pub async fn benefit_for(
    &self,
    guest: &guest::Model,
  ) -> Result<Option<MembershipBenefit>> {
    let Some(tier) = &guest.membership_tier else {
      return Ok(None);
    };

    let plan = membership_plan::Entity::find_by_id(tier.clone())
      .one(self.db)
      .await?;

    Ok(plan.filter(|p| p.is_active).map(|p| MembershipBenefit {
      tier: p.tier,
      percent: p.discount_percent,
      covers_services: p.covers_services,
    }))
  }
}
