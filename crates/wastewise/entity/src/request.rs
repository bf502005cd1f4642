use anyhow::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveActiveEnum, DeriveEntityModel, DerivePrimaryKey,
    DeriveRelation, EntityTrait, EnumIter, PrimaryKeyTrait,
};
use serde_json::Value;
use wastewise_api::{
    model::Id,
    request::{RequestSpec, ServiceRequest},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    pub requester_name: String,
    pub email: String,
    pub contact_numbers: Value,
    pub event_type: String,
    pub location: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    #[sea_orm(column_type = "Timestamp")]
    pub request_date: NaiveDateTime,
    pub status: RequestStatus,
    pub assigned_cleaners: Value,
    pub number_of_cleaners: i32,
    #[sea_orm(nullable)]
    pub estimated_duration: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[repr(i16)]
pub enum RequestStatus {
    New = 0,
    Pending = 1,
    Approved = 2,
    InProgress = 3,
    Completed = 4,
    Cancelled = 5,
}

impl From<RequestStatus> for ::wastewise_api::request::RequestStatus {
    fn from(value: RequestStatus) -> Self {
        match value {
            RequestStatus::New => Self::New,
            RequestStatus::Pending => Self::Pending,
            RequestStatus::Approved => Self::Approved,
            RequestStatus::InProgress => Self::InProgress,
            RequestStatus::Completed => Self::Completed,
            RequestStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<::wastewise_api::request::RequestStatus> for RequestStatus {
    fn from(value: ::wastewise_api::request::RequestStatus) -> Self {
        match value {
            ::wastewise_api::request::RequestStatus::New => Self::New,
            ::wastewise_api::request::RequestStatus::Pending => Self::Pending,
            ::wastewise_api::request::RequestStatus::Approved => Self::Approved,
            ::wastewise_api::request::RequestStatus::InProgress => Self::InProgress,
            ::wastewise_api::request::RequestStatus::Completed => Self::Completed,
            ::wastewise_api::request::RequestStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl TryFrom<Model> for ServiceRequest {
    type Error = Error;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        let Model {
            id,
            requester_name,
            email,
            contact_numbers,
            event_type,
            location,
            event_date,
            event_time,
            request_date,
            status,
            assigned_cleaners,
            number_of_cleaners,
            estimated_duration,
        } = value;

        let contact_numbers = ::serde_json::from_value(contact_numbers)?;
        let assigned_cleaners = ::serde_json::from_value(assigned_cleaners)?;

        Ok(Self::new(
            id,
            RequestSpec {
                requester_name,
                email,
                contact_numbers,
                event_type,
                location,
                event_date,
                event_time,
                request_date,
                status: status.into(),
                assigned_cleaners,
                number_of_cleaners,
                estimated_duration,
            },
        ))
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            requester_name: ActiveValue::NotSet,
            email: ActiveValue::NotSet,
            contact_numbers: ActiveValue::NotSet,
            event_type: ActiveValue::NotSet,
            location: ActiveValue::NotSet,
            event_date: ActiveValue::NotSet,
            event_time: ActiveValue::NotSet,
            request_date: ActiveValue::NotSet,
            status: ActiveValue::NotSet,
            assigned_cleaners: ActiveValue::NotSet,
            number_of_cleaners: ActiveValue::NotSet,
            estimated_duration: ActiveValue::NotSet,
        }
    }

    pub fn from_spec(spec: RequestSpec, id: Option<Id>) -> Result<Self> {
        let RequestSpec {
            requester_name,
            email,
            contact_numbers,
            event_type,
            location,
            event_date,
            event_time,
            request_date,
            status,
            assigned_cleaners,
            number_of_cleaners,
            estimated_duration,
        } = spec;

        let contact_numbers = ::serde_json::to_value(contact_numbers)?;
        let assigned_cleaners = ::serde_json::to_value(assigned_cleaners)?;

        Ok(Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            requester_name: ActiveValue::Set(requester_name),
            email: ActiveValue::Set(email),
            contact_numbers: ActiveValue::Set(contact_numbers),
            event_type: ActiveValue::Set(event_type),
            location: ActiveValue::Set(location),
            event_date: ActiveValue::Set(event_date),
            event_time: ActiveValue::Set(event_time),
            request_date: ActiveValue::Set(request_date),
            status: ActiveValue::Set(status.into()),
            assigned_cleaners: ActiveValue::Set(assigned_cleaners),
            number_of_cleaners: ActiveValue::Set(number_of_cleaners),
            estimated_duration: ActiveValue::Set(estimated_duration),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
