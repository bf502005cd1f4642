use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::BinInventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::BinInventory::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::BinInventory::Address)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinInventory::Coordinates)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinInventory::Kind)
                            .integer() // i32
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinInventory::Status)
                            .integer() // i32
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinInventory::LastUpdated)
                            .timestamp() // Option<NaiveDateTime>
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::BinInventory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum BinInventory {
    Table,
    Id,
    Address,
    Coordinates,
    Kind,
    Status,
    LastUpdated,
}
