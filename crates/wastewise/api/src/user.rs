use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wastewise_core::error::ApiError;

use crate::{
    model::{BaseModel, Record},
    validate,
};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USER: &str = "USER";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is missing or malformed")]
    MissingToken,
    #[error("Session has expired or does not exist")]
    InvalidToken,
    #[error("Incorrect email or password")]
    BadCredentials,
    #[error("User account is not active")]
    Inactive,
    #[error("This page requires one of roles: {}", .0.join(", "))]
    MissingRole(Vec<String>),
    #[error("A user with email {0} already exists")]
    DuplicatedEmail(String),
    #[error("Role {0} does not exist")]
    UnknownRole(String),
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match &error {
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::BadCredentials
            | AuthError::Inactive => Self::unauthorized(error),
            AuthError::MissingRole(_) => Self::forbidden(error),
            AuthError::DuplicatedEmail(_) => Self::conflict(error),
            AuthError::UnknownRole(_) => Self::bad_request(error),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    pub role_name: String,
    #[serde(default)]
    pub role_description: Option<String>,
}

impl RoleSpec {
    pub fn admin() -> Self {
        Self {
            role_name: ROLE_ADMIN.into(),
            role_description: Some("Admin Role".into()),
        }
    }

    pub fn user() -> Self {
        Self {
            role_name: ROLE_USER.into(),
            role_description: Some("USER Role".into()),
        }
    }

    pub fn validate(&self) -> validate::Result {
        validate::require("Role name", &self.role_name)
    }
}

/// A registered account, as shown to admins; the password hash never leaves
/// the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpec {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_numbers: Vec<String>,
    pub active: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl BaseModel for UserSpec {
    const KEY: &'static str = "User";
    const ID_FIELD: &'static str = "userId";
}

impl UserSpec {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|name| name == role)
    }

    /// Passes when the user holds any of the `allowed` roles.
    pub fn authorize(&self, allowed: &[&str]) -> Result<(), AuthError> {
        if allowed.iter().any(|role| self.has_role(role)) {
            Ok(())
        } else {
            Err(AuthError::MissingRole(
                allowed.iter().map(|role| role.to_string()).collect(),
            ))
        }
    }
}

pub type User = Record<UserSpec>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_numbers: Vec<String>,
    pub password: String,
}

impl UserRegistration {
    pub fn validate(&self) -> validate::Result {
        validate::require("First name", &self.first_name)?;
        validate::require("Last name", &self.last_name)?;
        validate::email(&self.email)?;
        self.contact_numbers
            .iter()
            .try_for_each(|number| validate::contact_number(number))?;
        validate::password(&self.password)
    }

    /// Splits the registration into the public profile and the raw password.
    pub fn into_spec(self, roles: Vec<String>) -> (UserSpec, String) {
        let Self {
            first_name,
            last_name,
            email,
            contact_numbers,
            password,
        } = self;

        let spec = UserSpec {
            first_name,
            last_name,
            email: email.to_lowercase(),
            contact_numbers,
            active: true,
            roles,
        };
        (spec, password)
    }
}

/// An admin edit of an account; unset fields are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub contact_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl UserUpdate {
    pub fn validate(&self) -> validate::Result {
        if let Some(first_name) = &self.first_name {
            validate::require("First name", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            validate::require("Last name", last_name)?;
        }
        self.contact_numbers
            .iter()
            .flatten()
            .try_for_each(|number| validate::contact_number(number))
    }

    pub fn apply(self, stored: UserSpec) -> UserSpec {
        UserSpec {
            first_name: self.first_name.unwrap_or(stored.first_name),
            last_name: self.last_name.unwrap_or(stored.last_name),
            email: stored.email,
            contact_numbers: self.contact_numbers.unwrap_or(stored.contact_numbers),
            active: self.active.unwrap_or(stored.active),
            roles: self.roles.unwrap_or(stored.roles),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> UserRegistration {
        UserRegistration {
            first_name: "Viraj".into(),
            last_name: "Subhasingha".into(),
            email: "Viraj@Example.lk".into(),
            contact_numbers: vec!["0711234567".into()],
            password: "secret1".into(),
        }
    }

    #[test]
    fn register_as_active_user() {
        assert_eq!(registration().validate(), Ok(()));

        let (spec, password) = registration().into_spec(vec![ROLE_USER.into()]);
        assert!(spec.active);
        assert_eq!(spec.email, "viraj@example.lk");
        assert_eq!(password, "secret1");
        assert!(spec.has_role(ROLE_USER));
        assert!(!spec.has_role(ROLE_ADMIN));
    }

    #[test]
    fn reject_short_password() {
        let mut invalid = registration();
        invalid.password = "123".into();
        assert_eq!(
            invalid.validate(),
            Err(validate::ValidationError::PasswordTooShort { min: 6 }),
        );
    }

    #[test]
    fn authorize_by_any_role() {
        let (spec, _) = registration().into_spec(vec![ROLE_USER.into()]);
        assert_eq!(spec.authorize(&[ROLE_USER, ROLE_ADMIN]), Ok(()));

        let error = spec.authorize(&[ROLE_ADMIN]).unwrap_err();
        assert_eq!(ApiError::from(error).kind.status_code(), 403);
    }

    #[test]
    fn update_keeps_unset_fields() {
        let (stored, _) = registration().into_spec(vec![ROLE_USER.into()]);
        let update = UserUpdate {
            active: Some(false),
            roles: Some(vec![ROLE_ADMIN.into()]),
            ..Default::default()
        };
        let updated = update.apply(stored.clone());
        assert!(!updated.active);
        assert_eq!(updated.roles, [ROLE_ADMIN]);
        assert_eq!(updated.first_name, stored.first_name);
        assert_eq!(updated.email, stored.email);
    }

    #[test]
    fn map_auth_errors_to_status() {
        let status = |error: AuthError| ApiError::from(error).kind.status_code();
        assert_eq!(status(AuthError::BadCredentials), 401);
        assert_eq!(status(AuthError::Inactive), 401);
        assert_eq!(status(AuthError::DuplicatedEmail("a@b.lk".into())), 409);
    }
}
