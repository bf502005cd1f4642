use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;
use wastewise_core::error::ApiError;

use crate::{
    model::{BaseModel, Record},
    validate,
};

/// The lifecycle of a cleaning request.
///
/// ```text
/// NEW -> PENDING -> APPROVED -> IN_PROGRESS -> COMPLETED
///  \________\__________\____________\______-> CANCELLED
/// ```
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
pub enum RequestStatus {
    #[default]
    #[serde(alias = "New")]
    New,
    Pending,
    Approved,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Pending),
            Self::Pending => Some(Self::Approved),
            Self::Approved => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    pub fn transition(self, target: Self) -> Result<Self, WorkflowError> {
        if self == target {
            return Ok(target);
        }
        if self.is_terminal() {
            return Err(WorkflowError::Terminal { current: self });
        }
        if target == Self::Cancelled || self.next() == Some(target) {
            Ok(target)
        } else {
            Err(WorkflowError::Forbidden {
                current: self,
                target,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Status cannot be null")]
    MissingStatus,
    #[error("request is already {current} and cannot be changed")]
    Terminal { current: RequestStatus },
    #[error("request cannot move from {current} to {target}")]
    Forbidden {
        current: RequestStatus,
        target: RequestStatus,
    },
}

impl From<WorkflowError> for ApiError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::MissingStatus => Self::bad_request(error),
            WorkflowError::Terminal { .. } | WorkflowError::Forbidden { .. } => {
                Self::conflict(error)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    pub requester_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_numbers: Vec<String>,
    pub event_type: String,
    pub location: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub request_date: NaiveDateTime,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub assigned_cleaners: Vec<String>,
    #[serde(default)]
    pub number_of_cleaners: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
}

impl BaseModel for RequestSpec {
    const KEY: &'static str = "Request";
    const ID_FIELD: &'static str = "requestId";
}

pub type ServiceRequest = Record<RequestSpec>;

/// The citizen-facing request form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    pub requester_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub contact_numbers: Vec<String>,
    pub event_type: String,
    pub location: String,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_time: Option<NaiveTime>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
    #[serde(default)]
    pub number_of_cleaners: i32,
    #[serde(default)]
    pub estimated_duration: Option<f64>,
}

impl RequestDraft {
    pub fn validate(&self) -> validate::Result {
        validate::require("Name", &self.requester_name)?;
        validate::email(&self.email)?;
        if self.contact_numbers.is_empty() {
            return Err(validate::ValidationError::Required("Contact number"));
        }
        self.contact_numbers
            .iter()
            .try_for_each(|number| validate::contact_number(number))?;
        validate::require("Event type", &self.event_type)?;
        validate::require("Location", &self.location)?;
        if self.number_of_cleaners < 1 {
            return Err(validate::ValidationError::CleanersTooFew);
        }
        Ok(())
    }

    /// Builds a new request, filling the defaults from the submission time.
    ///
    /// Every request enters the workflow as [`RequestStatus::New`].
    pub fn into_spec(self, now: NaiveDateTime) -> RequestSpec {
        let Self {
            requester_name,
            email,
            contact_numbers,
            event_type,
            location,
            event_date,
            event_time,
            status: _,
            number_of_cleaners,
            estimated_duration,
        } = self;

        RequestSpec {
            requester_name,
            email,
            contact_numbers,
            event_type,
            location,
            event_date: event_date.unwrap_or_else(|| now.date()),
            event_time: event_time.unwrap_or_else(|| now.time()),
            request_date: now,
            status: RequestStatus::default(),
            assigned_cleaners: Vec::default(),
            number_of_cleaners,
            estimated_duration,
        }
    }

    /// Applies a citizen edit; the workflow state and crew assignment are
    /// owned by the admins and survive the update.
    pub fn merge_into(self, stored: RequestSpec) -> RequestSpec {
        let Self {
            requester_name,
            email,
            contact_numbers,
            event_type,
            location,
            event_date,
            event_time,
            status: _,
            number_of_cleaners,
            estimated_duration,
        } = self;

        RequestSpec {
            requester_name,
            email,
            contact_numbers,
            event_type,
            location,
            event_date: event_date.unwrap_or(stored.event_date),
            event_time: event_time.unwrap_or(stored.event_time),
            request_date: stored.request_date,
            status: stored.status,
            assigned_cleaners: stored.assigned_cleaners,
            number_of_cleaners,
            estimated_duration: estimated_duration.or(stored.estimated_duration),
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(number)) if number.trim().is_empty() => Vec::default(),
        Some(OneOrMany::One(number)) => vec![number],
        Some(OneOrMany::Many(numbers)) => numbers,
        None => Vec::default(),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusUpdate {
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAssignment {
    pub assigned_cleaners: Vec<String>,
    #[serde(default)]
    pub number_of_cleaners: Option<i32>,
}

impl RequestAssignment {
    pub fn apply(self, stored: RequestSpec) -> RequestSpec {
        let assigned = self.assigned_cleaners.len().try_into().unwrap_or(i32::MAX);
        let number_of_cleaners = self
            .number_of_cleaners
            .unwrap_or(stored.number_of_cleaners)
            .max(assigned);

        RequestSpec {
            assigned_cleaners: self.assigned_cleaners,
            number_of_cleaners,
            ..stored
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilter {
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

/// Number of requests in each workflow state; every state is present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats(pub BTreeMap<RequestStatus, usize>);

impl<'a> FromIterator<&'a RequestStatus> for RequestStats {
    fn from_iter<T: IntoIterator<Item = &'a RequestStatus>>(iter: T) -> Self {
        let mut stats: BTreeMap<_, _> = RequestStatus::iter().map(|status| (status, 0)).collect();
        for status in iter {
            *stats.entry(*status).or_default() += 1;
        }
        Self(stats)
    }
}
