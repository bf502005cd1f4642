use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::Requests::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::RequesterName)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::Email)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::ContactNumbers)
                            .json() // JSON Value
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::EventType)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::Location)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::EventDate)
                            .date() // NaiveDate
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::EventTime)
                            .time() // NaiveTime
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::RequestDate)
                            .timestamp() // NaiveDateTime
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::Status)
                            .small_integer() // RequestStatus
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::AssignedCleaners)
                            .json() // JSON Value
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::NumberOfCleaners)
                            .integer() // i32
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Requests::EstimatedDuration)
                            .double() // Option<f64>
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::Requests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Requests {
    Table,
    Id,
    RequesterName,
    Email,
    ContactNumbers,
    EventType,
    Location,
    EventDate,
    EventTime,
    RequestDate,
    Status,
    AssignedCleaners,
    NumberOfCleaners,
    EstimatedDuration,
}
