use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::Complaints::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::Complaints::CreatedAt)
                            .timestamp() // NaiveDateTime
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Complaints::Name)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Complaints::Complain)
                            .text() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Complaints::Image)
                            .text() // Option<String>
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::Complaints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Complaints {
    Table,
    Id,
    CreatedAt,
    Name,
    Complain,
    Image,
}
