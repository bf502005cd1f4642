use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::Users::Id)
                            .integer() // i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::Users::CreatedAt)
                            .timestamp() // NaiveDateTime
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Users::FirstName)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Users::LastName)
                            .string() // String
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Users::Email)
                            .string() // String
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(self::Users::ContactNumbers)
                            .json() // JSON Value
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Users::Password)
                            .string() // PHC string
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Users::Active)
                            .boolean() // bool
                            .default(false)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(self::Users::Roles)
                            .json() // JSON Value
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Users {
    Table,
    Id,
    CreatedAt,
    FirstName,
    LastName,
    Email,
    ContactNumbers,
    Password,
    Active,
    Roles,
}
