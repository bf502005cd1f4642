use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, DeleteResult, EntityTrait, QueryFilter};
use tracing::{info, instrument, Level};
use wastewise_api::{
    model::{Id, Page},
    user::{
        AuthError, LoginRequest, RoleSpec, User, UserRegistration, UserSpec, UserUpdate,
        ROLE_ADMIN, ROLE_USER,
    },
};
use wastewise_core::error::ApiError;

use super::Database;

/// An account which is created on startup unless its email is taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: &'static str,
}

impl SeedAccount {
    pub fn admin(email: String, password: String) -> Self {
        Self {
            first_name: "Aravinda".into(),
            last_name: "Varaj".into(),
            email,
            password,
            role: ROLE_ADMIN,
        }
    }

    pub fn user(email: String, password: String) -> Self {
        Self {
            first_name: "viraj".into(),
            last_name: "Subhasingha".into(),
            email,
            password,
            role: ROLE_USER,
        }
    }
}

impl Database {
    /// Makes sure the built-in roles and the given accounts exist.
    #[instrument(level = Level::INFO, skip_all)]
    pub async fn seed(&self, accounts: &[SeedAccount]) -> Result<()> {
        for spec in [RoleSpec::admin(), RoleSpec::user()] {
            if self.get_role(&spec.role_name).await?.is_none() {
                info!("Creating role: {}", &spec.role_name);
                self.insert_role(spec).await?;
            }
        }

        for account in accounts {
            let SeedAccount {
                first_name,
                last_name,
                email,
                password,
                role,
            } = account.clone();

            let email = email.to_lowercase();
            if self.find_user_by_email(&email).await?.is_some() {
                continue;
            }

            info!("Creating {role} account: {email}");
            let spec = UserSpec {
                first_name,
                last_name,
                email,
                contact_numbers: Vec::default(),
                active: true,
                roles: vec![role.into()],
            };
            self.insert_user(spec, &password).await?;
        }
        Ok(())
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn get_role(&self, name: &str) -> Result<Option<RoleSpec>> {
        let dsl = entity::role::Entity::find_by_id(name.to_string());

        dsl.one(&self.connection)
            .await
            .map(|model| model.map(Into::into))
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_roles(&self) -> Result<Vec<RoleSpec>> {
        let dsl = entity::role::Entity::find();

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn create_role(&self, spec: RoleSpec) -> Result<RoleSpec> {
        if self.get_role(&spec.role_name).await?.is_some() {
            let message = format!("Role {} already exists", &spec.role_name);
            return Err(ApiError::conflict(message).into());
        }
        self.insert_role(spec).await
    }

    async fn insert_role(&self, spec: RoleSpec) -> Result<RoleSpec> {
        let model = entity::role::ActiveModel::from_spec(spec);

        model
            .insert(&self.connection)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    /// Registers a citizen account with the default role.
    #[instrument(level = Level::INFO, skip(self, registration))]
    pub async fn register_user(&self, registration: UserRegistration) -> Result<User> {
        let (spec, password) = registration.into_spec(vec![ROLE_USER.into()]);
        if self.find_user_by_email(&spec.email).await?.is_some() {
            return Err(ApiError::from(AuthError::DuplicatedEmail(spec.email)).into());
        }
        self.insert_user(spec, &password).await
    }

    async fn insert_user(&self, spec: UserSpec, password: &str) -> Result<User> {
        let password_hash = crate::password::hash(password)?;
        let model = entity::user::ActiveModel::from_spec(spec, None, Some(password_hash))?;

        model
            .insert(&self.connection)
            .await
            .map_err(Into::into)
            .and_then(TryInto::try_into)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<entity::user::Model>> {
        let col_email = entity::user::Column::Email;
        let dsl = entity::user::Entity::find().filter(col_email.eq(email.to_lowercase()));

        dsl.one(&self.connection).await.map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn get_user(&self, id: Id) -> Result<Option<User>> {
        let dsl = entity::user::Entity::find_by_id(id);

        dsl.one(&self.connection)
            .await
            .map_err(Into::into)
            .and_then(|model| model.map(TryInto::try_into).transpose())
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        let col_id = entity::user::Column::Id;
        let dsl = super::paginate(entity::user::Entity::find(), col_id, page);

        dsl.all(&self.connection)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    #[instrument(level = Level::INFO, skip(self, update))]
    pub async fn update_user(&self, id: Id, update: UserUpdate) -> Result<Option<User>> {
        if let Some(roles) = &update.roles {
            for role in roles {
                if self.get_role(role).await?.is_none() {
                    return Err(ApiError::from(AuthError::UnknownRole(role.clone())).into());
                }
            }
        }

        let stored = match self.get_user(id).await? {
            Some(stored) => stored,
            None => return Ok(None),
        };
        let spec = update.apply(stored.spec);
        let model = entity::user::ActiveModel::from_spec(spec, Some(id), None)?;

        match model.update(&self.connection).await {
            Ok(model) => model.try_into().map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_user(&self, id: Id) -> Result<bool> {
        let model = entity::user::ActiveModel::from_id(id);
        let dsl = entity::user::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }

    /// Checks the credentials of an active account.
    #[instrument(level = Level::INFO, skip(self, request), fields(email = %request.email))]
    pub async fn authenticate(&self, request: LoginRequest) -> Result<User> {
        let LoginRequest { email, password } = request;

        let model = self
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| ApiError::from(AuthError::BadCredentials))?;
        if !crate::password::verify(&password, &model.password)? {
            return Err(ApiError::from(AuthError::BadCredentials).into());
        }
        if !model.active {
            return Err(ApiError::from(AuthError::Inactive).into());
        }
        model.try_into()
    }
}
