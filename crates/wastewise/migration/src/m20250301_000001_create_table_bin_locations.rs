use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::BinLocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::BinLocations::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::BinLocations::Address)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinLocations::Latitude)
                            .double() // f64
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinLocations::Longitude)
                            .double() // f64
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinLocations::WasteType)
                            .small_integer() // WasteType
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinLocations::Status)
                            .small_integer() // BinStatus
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::BinLocations::LastUpdated)
                            .timestamp() // NaiveDateTime
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::BinLocations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum BinLocations {
    Table,
    Id,
    Address,
    Latitude,
    Longitude,
    WasteType,
    Status,
    LastUpdated,
}
