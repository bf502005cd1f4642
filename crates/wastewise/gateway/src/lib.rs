extern crate wastewise_entity as entity;
extern crate wastewise_migration as migration;

pub mod actix;
pub mod clock;
pub mod db;
pub mod password;
pub mod reminder;
pub mod routes;
pub mod session;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{instrument, Level};
use wastewise_api::{calendar::RouteTable, component::NetworkComponent};
use wastewise_core::signal::FunctionSignal;

/// Every component the REST server shares between its workers.
#[derive(Clone)]
pub struct Gateway {
    pub clock: self::clock::Clock,
    pub db: self::db::Database,
    pub reminders: self::reminder::ReminderService,
    pub routes: ::std::sync::Arc<RouteTable>,
    pub sessions: self::session::SessionStore,
    pub signal: FunctionSignal,
}

#[async_trait]
impl NetworkComponent for Gateway {
    type Args = GatewayArgs;

    #[instrument(level = Level::INFO, skip(args, signal))]
    async fn try_new(
        args: <Self as NetworkComponent>::Args,
        signal: &FunctionSignal,
    ) -> Result<Self> {
        let GatewayArgs {
            clock,
            db,
            session,
        } = args;

        let clock = self::clock::Clock::try_new(clock, signal).await?;
        Ok(Self {
            clock,
            db: self::db::Database::try_new(db, signal).await?,
            reminders: self::reminder::ReminderService::new(clock),
            routes: Default::default(),
            sessions: self::session::SessionStore::try_new(session, signal).await?,
            signal: signal.clone(),
        })
    }
}

impl Gateway {
    /// Builds a gateway on a fresh in-memory database, for tests and demos.
    pub async fn try_memory() -> Result<Self> {
        let signal = FunctionSignal::default();
        let clock = self::clock::Clock::default();
        let sessions = self::session::SessionArgs::try_parse_from(["wastewise"])?;

        Ok(Self {
            clock,
            db: self::db::Database::try_memory().await?,
            reminders: self::reminder::ReminderService::new(clock),
            routes: Default::default(),
            sessions: self::session::SessionStore::try_new(sessions, &signal).await?,
            signal,
        })
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn close(&self) -> Result<()> {
        self.reminders.close();
        self.db.close().await
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Parser)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "camelCase")]
pub struct GatewayArgs {
    #[command(flatten)]
    pub clock: self::clock::ClockArgs,

    #[command(flatten)]
    pub db: self::db::DatabaseArgs,

    #[command(flatten)]
    pub session: self::session::SessionArgs,
}
