use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::Schedules::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::Schedules::Date)
                            .date() // NaiveDate
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Schedules::Time)
                            .time() // NaiveTime
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Schedules::Location)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Schedules::WasteType)
                            .small_integer() // CollectionType
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::Schedules::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Schedules {
    Table,
    Id,
    Date,
    Time,
    Location,
    WasteType,
}
