use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Vouchers::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Vouchers::Code).string().not_null().primary_key(),
          )
          .col(ColumnDef::new(Vouchers::DiscountType).text().not_null())
          .col(ColumnDef::new(Vouchers::Value).big_integer().not_null())
          .col(ColumnDef::new(Vouchers::MaxDiscount).big_integer().null())
          .col(ColumnDef::new(Vouchers::MinBookingValue).big_integer().null())
          .col(ColumnDef::new(Vouchers::MaxUses).integer().null())
          .col(ColumnDef::new(Vouchers::MaxUsesPerGuest).integer().null())
          .col(
            ColumnDef::new(Vouchers::UsedCount)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Vouchers::AllowedTiers).json().not_null())
          .col(ColumnDef::new(Vouchers::ListingIds).json().not_null())
          .col(ColumnDef::new(Vouchers::PropertyTypes).json().not_null())
          .col(ColumnDef::new(Vouchers::ValidFrom).date_time().not_null())
          .col(ColumnDef::new(Vouchers::ValidUntil).date_time().not_null())
          .col(
            ColumnDef::new(Vouchers::StackWithMembership)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(Vouchers::StackWithPromotions)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(Vouchers::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(Vouchers::Source).text().not_null())
          .col(ColumnDef::new(Vouchers::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_vouchers_active_window")
          .table(Vouchers::Table)
          .col(Vouchers::IsActive)
          .col(Vouchers::ValidUntil)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_index(
        Index::drop()
          .name("idx_vouchers_active_window")
          .table(Vouchers::Table)
          .to_owned(),
      )
      .await?;

    manager.drop_table(Table::drop().table(Vouchers::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Vouchers {
  Table,
  Code,
  DiscountType,
  Value,
  MaxDiscount,
  MinBookingValue,
  MaxUses,
  MaxUsesPerGuest,
  UsedCount,
  AllowedTiers,
  ListingIds,
  PropertyTypes,
  ValidFrom,
  ValidUntil,
  StackWithMembership,
  StackWithPromotions,
  IsActive,
  Source,
  CreatedAt,
}
