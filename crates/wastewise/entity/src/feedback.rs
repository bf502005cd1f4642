use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveEntityModel, DerivePrimaryKey, DeriveRelation,
    EntityTrait, EnumIter, PrimaryKeyTrait,
};
use wastewise_api::{
    feedback::{Feedback, FeedbackSpec},
    model::Id,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    #[sea_orm(column_type = "Timestamp")]
    pub created_at: NaiveDateTime,
    pub username: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub rating: i32,
}

impl From<Model> for Feedback {
    fn from(value: Model) -> Self {
        let Model {
            id,
            created_at: _,
            username,
            message,
            rating,
        } = value;

        Self::new(
            id,
            FeedbackSpec {
                username,
                message,
                rating,
            },
        )
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            created_at: ActiveValue::NotSet,
            username: ActiveValue::NotSet,
            message: ActiveValue::NotSet,
            rating: ActiveValue::NotSet,
        }
    }

    pub fn from_spec(spec: FeedbackSpec, id: Option<Id>) -> Self {
        let FeedbackSpec {
            username,
            message,
            rating,
        } = spec;

        Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            created_at: ActiveValue::NotSet,
            username: ActiveValue::Set(username),
            message: ActiveValue::Set(message),
            rating: ActiveValue::Set(rating),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
