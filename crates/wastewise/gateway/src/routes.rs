pub mod bin;
pub mod complaint;
pub mod feedback;
pub mod inventory;
pub mod reminder;
pub mod request;
pub mod schedule;
pub mod user;

use actix_web::{HttpRequest, HttpResponse};
use anyhow::Result;
use serde::Serialize;
use wastewise_api::{
    model::{Id, Message},
    user::{AuthError, User},
    validate,
};
use wastewise_core::{error::ApiError, result};

use crate::{db::Database, session::SessionStore};

fn respond<T>(result: Result<T>) -> HttpResponse
where
    T: Serialize,
{
    HttpResponse::from(result::Result::from(result))
}

fn respond_created<T>(result: Result<T>) -> HttpResponse
where
    T: Serialize,
{
    match result {
        Ok(value) => HttpResponse::Created().json(result::Result::Ok(value)),
        Err(error) => respond::<T>(Err(error)),
    }
}

fn validated(result: validate::Result) -> Result<()> {
    result.map_err(|error| ApiError::from(error).into())
}

fn found<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| ApiError::not_found(message).into())
}

fn deleted(id: Id, removed: bool, message: &str) -> Result<Message> {
    if removed {
        Ok(format!("{id} Deleted Successfully"))
    } else {
        Err(ApiError::not_found(message).into())
    }
}

/// Resolves the signed-in user and checks that it holds any of `roles`.
async fn authorize(
    db: &Database,
    sessions: &SessionStore,
    request: &HttpRequest,
    roles: &[&str],
) -> Result<User> {
    let user_id = sessions.authenticate(request).map_err(ApiError::from)?;
    let user = db
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::from(AuthError::InvalidToken))?;

    if !user.spec.active {
        return Err(ApiError::from(AuthError::Inactive).into());
    }
    user.spec.authorize(roles).map_err(ApiError::from)?;
    Ok(user)
}
