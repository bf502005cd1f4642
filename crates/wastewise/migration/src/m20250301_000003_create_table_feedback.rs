use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::Feedback::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::Feedback::CreatedAt)
                            .timestamp() // NaiveDateTime
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Feedback::Username)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Feedback::Message)
                            .text() // Option<String>
                            .null(),
                    )
                    .col(
                        ColumnDef::new(self::Feedback::Rating)
                            .integer() // i32
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::Feedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Feedback {
    Table,
    Id,
    CreatedAt,
    Username,
    Message,
    Rating,
}
