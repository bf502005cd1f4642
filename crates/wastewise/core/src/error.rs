use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    BadRequest,
    Conflict,
    Forbidden,
    #[default]
    Internal,
    NotFound,
    Unauthorized,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => "bad request".fmt(f),
            Self::Conflict => "conflict".fmt(f),
            Self::Forbidden => "forbidden".fmt(f),
            Self::Internal => "internal error".fmt(f),
            Self::NotFound => "not found".fmt(f),
            Self::Unauthorized => "unauthorized".fmt(f),
        }
    }
}

/// An error which knows how it should be reported to a remote caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl ToString) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn bad_request(message: impl ToString) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn conflict(message: impl ToString) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn forbidden(message: impl ToString) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl ToString) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl ToString) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Recovers the reportable error from an opaque one, falling back to
    /// [`ErrorKind::Internal`].
    pub fn from_anyhow(error: &::anyhow::Error) -> Self {
        match error.downcast_ref::<Self>() {
            Some(error) => error.clone(),
            None => Self::new(ErrorKind::Internal, error),
        }
    }
}
