use sea_orm_migration::prelude::*;

use super::{
  m20260701_000003_create_vouchers::Vouchers,
  m20260701_000004_create_bookings::Bookings,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(VoucherRedemptions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(VoucherRedemptions::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(VoucherRedemptions::Code).string().not_null())
          .col(
            ColumnDef::new(VoucherRedemptions::GuestId)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(VoucherRedemptions::BookingId).string().not_null(),
          )
          .col(
            ColumnDef::new(VoucherRedemptions::Amount)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(VoucherRedemptions::RedeemedAt)
              .date_time()
              .not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_voucher_redemptions_voucher")
              .from(VoucherRedemptions::Table, VoucherRedemptions::Code)
              .to(Vouchers::Table, Vouchers::Code)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_voucher_redemptions_booking")
              .from(VoucherRedemptions::Table, VoucherRedemptions::BookingId)
              .to(Bookings::Table, Bookings::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_voucher_redemptions_code_guest")
          .table(VoucherRedemptions::Table)
          .col(VoucherRedemptions::Code)
          .col(VoucherRedemptions::GuestId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(VoucherRedemptions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum VoucherRedemptions {
  Table,
  Id,
  Code,
  GuestId,
  BookingId,
  Amount,
  RedeemedAt,
}
