mod m20250301_000001_create_table_bin_locations;
mod m20250301_000002_create_table_bin_inventory;
mod m20250301_000003_create_table_feedback;
mod m20250301_000004_create_table_complaints;
mod m20250302_000001_create_table_requests;
mod m20250302_000002_create_table_schedules;
mod m20250303_000001_create_table_roles;
mod m20250303_000002_create_table_users;

use async_trait::async_trait;

pub use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(self::m20250301_000001_create_table_bin_locations::Migration),
            Box::new(self::m20250301_000002_create_table_bin_inventory::Migration),
            Box::new(self::m20250301_000003_create_table_feedback::Migration),
            Box::new(self::m20250301_000004_create_table_complaints::Migration),
            Box::new(self::m20250302_000001_create_table_requests::Migration),
            Box::new(self::m20250302_000002_create_table_schedules::Migration),
            Box::new(self::m20250303_000001_create_table_roles::Migration),
            Box::new(self::m20250303_000002_create_table_users::Migration),
        ]
    }
}
