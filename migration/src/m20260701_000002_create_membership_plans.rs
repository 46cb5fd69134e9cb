use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(MembershipPlans::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(MembershipPlans::Tier)
              .string()
              .not_null()
              .primary_key(),
          )
          .col(
            ColumnDef::new(MembershipPlans::DiscountPercent)
              .integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(MembershipPlans::CoversServices)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(MembershipPlans::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(MembershipPlans::CreatedAt).date_time().not_null(),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(MembershipPlans::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum MembershipPlans {
  Table,
  Tier,
  DiscountPercent,
  CoversServices,
  IsActive,
  CreatedAt,
}
