use anyhow::{Error, Result};
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelBehavior, ActiveValue, DeriveEntityModel, DerivePrimaryKey, DeriveRelation,
    EntityTrait, EnumIter, PrimaryKeyTrait,
};
use serde_json::Value;
use wastewise_api::{
    model::Id,
    user::{User, UserSpec},
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    #[sea_orm(column_type = "Timestamp")]
    pub created_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub contact_numbers: Value,
    /// Argon2 hash in the PHC string format.
    pub password: String,
    pub active: bool,
    pub roles: Value,
}

impl TryFrom<Model> for User {
    type Error = Error;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        let Model {
            id,
            created_at: _,
            first_name,
            last_name,
            email,
            contact_numbers,
            password: _,
            active,
            roles,
        } = value;

        let contact_numbers = ::serde_json::from_value(contact_numbers)?;
        let roles = ::serde_json::from_value(roles)?;

        Ok(Self::new(
            id,
            UserSpec {
                first_name,
                last_name,
                email,
                contact_numbers,
                active,
                roles,
            },
        ))
    }
}

impl ActiveModel {
    pub const fn from_id(id: Id) -> Self {
        Self {
            id: ActiveValue::Set(id),
            created_at: ActiveValue::NotSet,
            first_name: ActiveValue::NotSet,
            last_name: ActiveValue::NotSet,
            email: ActiveValue::NotSet,
            contact_numbers: ActiveValue::NotSet,
            password: ActiveValue::NotSet,
            active: ActiveValue::NotSet,
            roles: ActiveValue::NotSet,
        }
    }

    /// Leaves the stored password untouched when `password_hash` is absent.
    pub fn from_spec(spec: UserSpec, id: Option<Id>, password_hash: Option<String>) -> Result<Self> {
        let UserSpec {
            first_name,
            last_name,
            email,
            contact_numbers,
            active,
            roles,
        } = spec;

        let contact_numbers = ::serde_json::to_value(contact_numbers)?;
        let roles = ::serde_json::to_value(roles)?;

        Ok(Self {
            id: id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            created_at: ActiveValue::NotSet,
            first_name: ActiveValue::Set(first_name),
            last_name: ActiveValue::Set(last_name),
            email: ActiveValue::Set(email),
            contact_numbers: ActiveValue::Set(contact_numbers),
            password: password_hash.map_or(ActiveValue::NotSet, ActiveValue::Set),
            active: ActiveValue::Set(active),
            roles: ActiveValue::Set(roles),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
