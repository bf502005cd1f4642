use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveEntityModel, DerivePrimaryKey, DeriveRelation,
    EntityTrait, EnumIter, PrimaryKeyTrait,
};
use wastewise_api::{
    inventory::{BinInventory, BinInventorySpec},
    model::Id,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bin_inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    pub address: String,
    pub coordinates: String,
    pub kind: i32,
    pub status: i32,
    #[sea_orm(column_type = "Timestamp", nullable)]
    pub last_updated: Option<NaiveDateTime>,
}

impl From<Model> for BinInventory {
    fn from(value: Model) -> Self {
        let Model {
            id,
            address,
            coordinates,
            kind,
            status,
            last_updated,
        } = value;

        Self::new(
            id,
            BinInventorySpec {
                address,
                coordinates,
                kind,
                status,
                last_updated,
            },
        )
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            address: ActiveValue::NotSet,
            coordinates: ActiveValue::NotSet,
            kind: ActiveValue::NotSet,
            status: ActiveValue::NotSet,
            last_updated: ActiveValue::NotSet,
        }
    }

    pub fn from_spec(spec: BinInventorySpec, id: Option<Id>) -> Self {
        let BinInventorySpec {
            address,
            coordinates,
            kind,
            status,
            last_updated,
        } = spec;

        Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            address: ActiveValue::Set(address),
            coordinates: ActiveValue::Set(coordinates),
            kind: ActiveValue::Set(kind),
            status: ActiveValue::Set(status),
            last_updated: ActiveValue::Set(last_updated),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
