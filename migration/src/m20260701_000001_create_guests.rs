use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Guests::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Guests::GuestId)
              .big_integer()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(Guests::MembershipTier).string().null())
          .col(ColumnDef::new(Guests::JoinedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Guests::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Guests {
  Table,
  GuestId,
  MembershipTier,
  JoinedAt,
}
