use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveActiveEnum, DeriveEntityModel, DerivePrimaryKey,
    DeriveRelation, EntityTrait, EnumIter, PrimaryKeyTrait,
};
use wastewise_api::{
    bin::{BinLocation, BinLocationSpec},
    model::Id,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bin_locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub waste_type: WasteType,
    pub status: BinStatus,
    #[sea_orm(column_type = "Timestamp")]
    pub last_updated: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[repr(i16)]
pub enum WasteType {
    Organic = 0,
    Plastic = 1,
    Paper = 2,
    Metal = 3,
}

impl From<WasteType> for ::wastewise_api::bin::WasteType {
    fn from(value: WasteType) -> Self {
        match value {
            WasteType::Organic => Self::Organic,
            WasteType::Plastic => Self::Plastic,
            WasteType::Paper => Self::Paper,
            WasteType::Metal => Self::Metal,
        }
    }
}

impl From<::wastewise_api::bin::WasteType> for WasteType {
    fn from(value: ::wastewise_api::bin::WasteType) -> Self {
        match value {
            ::wastewise_api::bin::WasteType::Organic => Self::Organic,
            ::wastewise_api::bin::WasteType::Plastic => Self::Plastic,
            ::wastewise_api::bin::WasteType::Paper => Self::Paper,
            ::wastewise_api::bin::WasteType::Metal => Self::Metal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[repr(i16)]
pub enum BinStatus {
    Empty = 0,
    HalfFull = 1,
    Full = 2,
}

impl From<BinStatus> for ::wastewise_api::bin::BinStatus {
    fn from(value: BinStatus) -> Self {
        match value {
            BinStatus::Empty => Self::Empty,
            BinStatus::HalfFull => Self::HalfFull,
            BinStatus::Full => Self::Full,
        }
    }
}

impl From<::wastewise_api::bin::BinStatus> for BinStatus {
    fn from(value: ::wastewise_api::bin::BinStatus) -> Self {
        match value {
            ::wastewise_api::bin::BinStatus::Empty => Self::Empty,
            ::wastewise_api::bin::BinStatus::HalfFull => Self::HalfFull,
            ::wastewise_api::bin::BinStatus::Full => Self::Full,
        }
    }
}

impl From<Model> for BinLocation {
    fn from(value: Model) -> Self {
        let Model {
            id,
            address,
            latitude,
            longitude,
            waste_type,
            status,
            last_updated,
        } = value;

        Self::new(
            id,
            BinLocationSpec {
                address,
                latitude,
                longitude,
                waste_type: waste_type.into(),
                status: status.into(),
                last_updated: Some(last_updated),
            },
        )
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            address: ActiveValue::NotSet,
            latitude: ActiveValue::NotSet,
            longitude: ActiveValue::NotSet,
            waste_type: ActiveValue::NotSet,
            status: ActiveValue::NotSet,
            last_updated: ActiveValue::NotSet,
        }
    }

    /// Stamps the record with `now`; an unset `id` lets the database assign one.
    pub fn from_spec(spec: BinLocationSpec, id: Option<Id>, now: NaiveDateTime) -> Self {
        let BinLocationSpec {
            address,
            latitude,
            longitude,
            waste_type,
            status,
            last_updated: _,
        } = spec;

        Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            address: ActiveValue::Set(address),
            latitude: ActiveValue::Set(latitude),
            longitude: ActiveValue::Set(longitude),
            waste_type: ActiveValue::Set(waste_type.into()),
            status: ActiveValue::Set(status.into()),
            last_updated: ActiveValue::Set(now),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
