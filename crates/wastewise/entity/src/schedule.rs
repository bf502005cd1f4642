use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveActiveEnum, DeriveEntityModel, DerivePrimaryKey,
    DeriveRelation, EntityTrait, EnumIter, PrimaryKeyTrait,
};
use wastewise_api::{
    model::Id,
    schedule::{Schedule, ScheduleSpec},
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub waste_type: CollectionType,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[repr(i16)]
pub enum CollectionType {
    GeneralWaste = 0,
    Recyclables = 1,
    ElectronicWaste = 2,
    GreenWaste = 3,
}

impl From<CollectionType> for ::wastewise_api::schedule::CollectionType {
    fn from(value: CollectionType) -> Self {
        match value {
            CollectionType::GeneralWaste => Self::GeneralWaste,
            CollectionType::Recyclables => Self::Recyclables,
            CollectionType::ElectronicWaste => Self::ElectronicWaste,
            CollectionType::GreenWaste => Self::GreenWaste,
        }
    }
}

impl From<::wastewise_api::schedule::CollectionType> for CollectionType {
    fn from(value: ::wastewise_api::schedule::CollectionType) -> Self {
        match value {
            ::wastewise_api::schedule::CollectionType::GeneralWaste => Self::GeneralWaste,
            ::wastewise_api::schedule::CollectionType::Recyclables => Self::Recyclables,
            ::wastewise_api::schedule::CollectionType::ElectronicWaste => Self::ElectronicWaste,
            ::wastewise_api::schedule::CollectionType::GreenWaste => Self::GreenWaste,
        }
    }
}

impl From<Model> for Schedule {
    fn from(value: Model) -> Self {
        let Model {
            id,
            date,
            time,
            location,
            waste_type,
        } = value;

        Self::new(
            id,
            ScheduleSpec {
                date,
                time,
                location,
                waste_type: waste_type.into(),
            },
        )
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            date: ActiveValue::NotSet,
            time: ActiveValue::NotSet,
            location: ActiveValue::NotSet,
            waste_type: ActiveValue::NotSet,
        }
    }

    pub fn from_spec(spec: ScheduleSpec, id: Option<Id>) -> Self {
        let ScheduleSpec {
            date,
            time,
            location,
            waste_type,
        } = spec;

        Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            date: ActiveValue::Set(date),
            time: ActiveValue::Set(time),
            location: ActiveValue::Set(location),
            waste_type: ActiveValue::Set(waste_type.into()),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
