use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use wastewise_api::component::NetworkComponent;
use wastewise_core::signal::FunctionSignal;

/// Wall clock of the municipality the gateway serves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    offset: FixedOffset,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }
}

#[async_trait]
impl NetworkComponent for Clock {
    type Args = ClockArgs;

    async fn try_new(args: <Self as NetworkComponent>::Args, _: &FunctionSignal) -> Result<Self> {
        let ClockArgs { utc_offset_minutes } = args;

        utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or_else(|| anyhow!("UTC offset out of range: {utc_offset_minutes} minutes"))
    }
}

impl Clock {
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn now_naive(&self) -> NaiveDateTime {
        self.now().naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Parser)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "camelCase")]
pub struct ClockArgs {
    #[arg(
        long,
        env = "WASTEWISE_UTC_OFFSET_MINUTES",
        value_name = "MINUTES",
        allow_negative_numbers = true,
        default_value_t = ClockArgs::default_utc_offset_minutes(),
    )]
    pub utc_offset_minutes: i32,
}

impl ClockArgs {
    const fn default_utc_offset_minutes() -> i32 {
        0
    }
}
