use sea_orm_migration::prelude::*;

use super::m20260701_000004_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(AppliedPromotions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AppliedPromotions::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(AppliedPromotions::BookingId).string().not_null(),
          )
          .col(ColumnDef::new(AppliedPromotions::Seq).integer().not_null())
          .col(ColumnDef::new(AppliedPromotions::Kind).text().not_null())
          .col(ColumnDef::new(AppliedPromotions::Label).string().not_null())
          .col(ColumnDef::new(AppliedPromotions::Percent).integer().null())
          .col(
            ColumnDef::new(AppliedPromotions::Amount).big_integer().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_applied_promotions_booking")
              .from(AppliedPromotions::Table, AppliedPromotions::BookingId)
              .to(Bookings::Table, Bookings::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_applied_promotions_booking")
          .table(AppliedPromotions::Table)
          .col(AppliedPromotions::BookingId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(AppliedPromotions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum AppliedPromotions {
  Table,
  Id,
  BookingId,
  Seq,
  Kind,
  Label,
  Percent,
  Amount,
}
