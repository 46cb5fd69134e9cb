pub use sea_orm_migration::prelude::*;

mod m20260701_000001_create_guests;
mod m20260701_000002_create_membership_plans;
mod m20260701_000003_create_vouchers;
mod m20260701_000004_create_bookings;
mod m20260701_000005_create_applied_promotions;
mod m20260701_000006_create_voucher_redemptions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260701_000001_create_guests::Migration),
      Box::new(m20260701_000002_create_membership_plans::Migration),
      Box::new(m20260701_000003_create_vouchers::Migration),
      Box::new(m20260701_000004_create_bookings::Migration),
      Box::new(m20260701_000005_create_applied_promotions::Migration),
      Box::new(m20260701_000006_create_voucher_redemptions::Migration),
    ]
  }
}
