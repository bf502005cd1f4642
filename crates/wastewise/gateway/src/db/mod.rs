mod bin;
mod complaint;
mod feedback;
mod inventory;
mod request;
mod schedule;
mod user;

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::Parser;
use migration::MigratorTrait;
use sea_orm::{
    ColumnTrait, ConnectOptions, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, Level};
use wastewise_api::{component::NetworkComponent, model::Page};
use wastewise_core::signal::FunctionSignal;

pub use self::user::SeedAccount;

#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

#[async_trait]
impl NetworkComponent for Database {
    type Args = DatabaseArgs;

    #[instrument(level = Level::INFO, skip(args, _signal))]
    async fn try_new(
        args: <Self as NetworkComponent>::Args,
        _signal: &FunctionSignal,
    ) -> Result<Self> {
        let DatabaseArgs {
            db_endpoint,
            admin_email,
            admin_password,
            user_email,
            user_password,
        } = args;

        let mut opt = ConnectOptions::new(db_endpoint.clone());
        if db_endpoint.contains(":memory:") {
            // every pooled connection would otherwise open its own empty database
            opt.min_connections(1)
                .max_connections(1)
                .max_lifetime(Duration::from_secs(365 * 24 * 60 * 60));
        }
        opt.sqlx_logging(false);

        let connection = ::sea_orm::Database::connect(opt)
            .await
            .map_err(|error| anyhow!("failed to connect to a wastewise db: {error}"))?;

        let steps = None;
        ::migration::Migrator::up(&connection, steps)
            .await
            .map_err(|error| anyhow!("failed to upgrade the wastewise db: {error}"))?;

        let db = Self { connection };
        db.seed(&[
            SeedAccount::admin(admin_email, admin_password),
            SeedAccount::user(user_email, user_password),
        ])
        .await?;
        info!("Database is ready");
        Ok(db)
    }
}

impl Database {
    /// Connects to a fresh in-memory database with the default seed accounts.
    pub async fn try_memory() -> Result<Self> {
        let args = DatabaseArgs::try_parse_from(["wastewise"])?;
        Self::try_new(args, &FunctionSignal::default()).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn close(&self) -> Result<()> {
        self.connection
            .clone()
            .close()
            .await
            .map_err(|error| anyhow!("failed to close the wastewise db: {error}"))
    }
}

/// Restricts a listing to the records after `start`, at most `limit` of them.
fn paginate<E, C>(dsl: Select<E>, col_id: C, page: Page) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait + Copy,
{
    let Page { start, limit } = page;

    let dsl = dsl.order_by_asc(col_id).limit(limit);
    match start {
        Some(start) => dsl.filter(col_id.gt(start)),
        None => dsl,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Parser)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "camelCase")]
pub struct DatabaseArgs {
    #[arg(
        long,
        env = "WASTEWISE_DB_ENDPOINT",
        value_name = "URL",
        default_value_t = DatabaseArgs::default_db_endpoint(),
    )]
    pub db_endpoint: String,

    #[arg(
        long,
        env = "WASTEWISE_ADMIN_EMAIL",
        value_name = "EMAIL",
        default_value_t = DatabaseArgs::default_admin_email(),
    )]
    pub admin_email: String,

    #[arg(
        long,
        env = "WASTEWISE_ADMIN_PASSWORD",
        value_name = "PASSWORD",
        default_value_t = DatabaseArgs::default_admin_password(),
    )]
    pub admin_password: String,

    #[arg(
        long,
        env = "WASTEWISE_USER_EMAIL",
        value_name = "EMAIL",
        default_value_t = DatabaseArgs::default_user_email(),
    )]
    pub user_email: String,

    #[arg(
        long,
        env = "WASTEWISE_USER_PASSWORD",
        value_name = "PASSWORD",
        default_value_t = DatabaseArgs::default_user_password(),
    )]
    pub user_password: String,
}

impl DatabaseArgs {
    fn default_db_endpoint() -> String {
        "sqlite::memory:".into()
    }

    fn default_admin_email() -> String {
        "admin123@gmail.com".into()
    }

    fn default_admin_password() -> String {
        "admin@123".into()
    }

    fn default_user_email() -> String {
        "user123@gmail.com".into()
    }

    fn default_user_password() -> String {
        "user@123".into()
    }
}
