use sea_orm_migration::prelude::*;

use super::m20260701_000001_create_guests::Guests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Bookings::Table)
          .if_not_exists()
          .col(ColumnDef::new(Bookings::Id).string().not_null().primary_key())
          .col(ColumnDef::new(Bookings::GuestId).big_integer().not_null())
          .col(ColumnDef::new(Bookings::ListingId).string().not_null())
          .col(ColumnDef::new(Bookings::PropertyType).string().not_null())
          .col(ColumnDef::new(Bookings::BasePrice).big_integer().not_null())
          .col(ColumnDef::new(Bookings::Nights).integer().not_null())
          .col(ColumnDef::new(Bookings::CleaningFee).big_integer().not_null())
          .col(ColumnDef::new(Bookings::ServiceFee).big_integer().not_null())
          .col(
            ColumnDef::new(Bookings::MembershipDiscount)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(Bookings::PromotionDiscount)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(Bookings::TotalPrice).big_integer().not_null())
          .col(ColumnDef::new(Bookings::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_bookings_guest")
              .from(Bookings::Table, Bookings::GuestId)
              .to(Guests::Table, Guests::GuestId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_bookings_guest")
          .table(Bookings::Table)
          .col(Bookings::GuestId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Bookings::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Bookings {
  Table,
  Id,
  GuestId,
  ListingId,
  PropertyType,
  BasePrice,
  Nights,
  CleaningFee,
  ServiceFee,
  MembershipDiscount,
  PromotionDiscount,
  TotalPrice,
  CreatedAt,
}
