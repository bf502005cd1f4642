#[cfg(feature = "actix-web")]
use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The wire envelope of every gateway reply.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "result", content = "spec")]
pub enum Result<T> {
    Ok(T),
    Err(ApiError),
}

impl<T> Result<T> {
    pub fn into_anyhow(self) -> ::anyhow::Result<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(error.into()),
        }
    }
}

impl<T> From<::anyhow::Result<T>> for Result<T> {
    fn from(value: ::anyhow::Result<T>) -> Self {
        match value {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(ApiError::from_anyhow(&error)),
        }
    }
}

impl<T> From<::core::result::Result<T, ApiError>> for Result<T> {
    fn from(value: ::core::result::Result<T, ApiError>) -> Self {
        match value {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

#[cfg(feature = "actix-web")]
impl<T> From<Result<T>> for HttpResponse
where
    T: Serialize,
{
    fn from(value: Result<T>) -> Self {
        match &value {
            Result::Ok(_) => HttpResponse::Ok().json(value),
            Result::Err(error) => {
                let status = StatusCode::from_u16(error.kind.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                HttpResponse::build(status).json(value)
            }
        }
    }
}
