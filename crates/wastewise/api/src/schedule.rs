use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    model::{BaseModel, Record},
    validate,
};

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionType {
    #[serde(alias = "General Waste")]
    #[strum(to_string = "GENERAL_WASTE", serialize = "General Waste")]
    GeneralWaste,
    #[serde(alias = "Recyclables")]
    #[strum(to_string = "RECYCLABLES", serialize = "Recyclables")]
    Recyclables,
    #[serde(alias = "Electronic Waste")]
    #[strum(to_string = "ELECTRONIC_WASTE", serialize = "Electronic Waste")]
    ElectronicWaste,
    #[serde(alias = "Green Waste")]
    #[strum(to_string = "GREEN_WASTE", serialize = "Green Waste")]
    GreenWaste,
}

impl CollectionType {
    /// The name shown to citizens.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GeneralWaste => "General Waste",
            Self::Recyclables => "Recyclables",
            Self::ElectronicWaste => "Electronic Waste",
            Self::GreenWaste => "Green Waste",
        }
    }
}

/// A one-off collection slot recorded by the admins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub waste_type: CollectionType,
}

impl BaseModel for ScheduleSpec {
    const KEY: &'static str = "Schedule";
    const ID_FIELD: &'static str = "scheduleId";
}

impl ScheduleSpec {
    pub fn validate(&self) -> validate::Result {
        validate::require("Location", &self.location)
    }
}

pub type Schedule = Record<ScheduleSpec>;
