use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveEntityModel, DerivePrimaryKey, DeriveRelation,
    EntityTrait, EnumIter, PrimaryKeyTrait,
};
use wastewise_api::{
    complaint::{Complaint, ComplaintSpec},
    model::Id,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    #[sea_orm(column_type = "Timestamp")]
    pub created_at: NaiveDateTime,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub complain: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
}

impl From<Model> for Complaint {
    fn from(value: Model) -> Self {
        let Model {
            id,
            created_at: _,
            name,
            complain,
            image,
        } = value;

        Self::new(
            id,
            ComplaintSpec {
                name,
                complain,
                image,
            },
        )
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            created_at: ActiveValue::NotSet,
            name: ActiveValue::NotSet,
            complain: ActiveValue::NotSet,
            image: ActiveValue::NotSet,
        }
    }

    pub fn from_spec(spec: ComplaintSpec, id: Option<Id>) -> Self {
        let ComplaintSpec {
            name,
            complain,
            image,
        } = spec;

        Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            created_at: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            complain: ActiveValue::Set(complain),
            image: ActiveValue::Set(image),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
