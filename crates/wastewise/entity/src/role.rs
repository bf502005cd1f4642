use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveEntityModel, DerivePrimaryKey, DeriveRelation,
    EntityTrait, EnumIter, PrimaryKeyTrait,
};
use wastewise_api::user::RoleSpec;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_name: String,
    #[sea_orm(nullable)]
    pub role_description: Option<String>,
}

impl From<Model> for RoleSpec {
    fn from(value: Model) -> Self {
        let Model {
            role_name,
            role_description,
        } = value;

        Self {
            role_name,
            role_description,
        }
    }
}

impl ActiveModel {
    pub fn from_spec(spec: RoleSpec) -> Self {
        let RoleSpec {
            role_name,
            role_description,
        } = spec;

        Self {
            role_name: ActiveValue::Set(role_name),
            role_description: ActiveValue::Set(role_description),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
