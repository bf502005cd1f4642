use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(self::Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(self::Roles::RoleName)
                            .string() // String
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(self::Roles::RoleDescription)
                            .string() // Option<String>
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(self::Roles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Roles {
    Table,
    RoleName,
    RoleDescription,
}
