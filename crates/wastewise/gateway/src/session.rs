use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use actix_web::HttpRequest;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn, Level};
use uuid::Uuid;
use wastewise_api::{component::NetworkComponent, model::Id, user::AuthError};
use wastewise_core::signal::FunctionSignal;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Session {
    user_id: Id,
    expires_at: DateTime<Utc>,
}

/// Opaque bearer tokens of signed-in users, kept in memory.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    ttl: Duration,
}

#[async_trait]
impl NetworkComponent for SessionStore {
    type Args = SessionArgs;

    async fn try_new(args: <Self as NetworkComponent>::Args, _: &FunctionSignal) -> Result<Self> {
        let SessionArgs { session_ttl } = args;

        Ok(Self::with_ttl(Duration::seconds(session_ttl.into())))
    }
}

impl SessionStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub fn issue(&self, user_id: Id) -> (String, DateTime<Utc>) {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + self.ttl;

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, session| session.expires_at > Utc::now());
        sessions.insert(
            token.clone(),
            Session {
                user_id,
                expires_at,
            },
        );
        (token, expires_at)
    }

    pub fn resolve(&self, token: &str) -> Result<Id, AuthError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(token).copied() {
            Some(session) if session.expires_at > Utc::now() => Ok(session.user_id),
            Some(_) => {
                sessions.remove(token);
                Err(AuthError::InvalidToken)
            }
            None => Err(AuthError::InvalidToken),
        }
    }

    pub fn revoke_user(&self, user_id: Id) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, session| session.user_id != user_id)
    }

    /// Resolves the user behind the `Authorization: Bearer <token>` header.
    pub fn authenticate(&self, request: &HttpRequest) -> Result<Id, AuthError> {
        bearer_token(request).and_then(|token| self.resolve(token))
    }
}

pub fn bearer_token(request: &HttpRequest) -> Result<&str, AuthError> {
    match request.headers().get("Authorization") {
        Some(header) => match header
            .to_str()
            .ok()
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            Some(token) => Ok(token),
            None => {
                warn!("the Authorization header is not a Bearer token");
                Err(AuthError::MissingToken)
            }
        },
        None => Err(AuthError::MissingToken),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Parser)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "camelCase")]
pub struct SessionArgs {
    #[arg(
        long,
        env = "WASTEWISE_SESSION_TTL",
        value_name = "SECONDS",
        default_value_t = SessionArgs::default_session_ttl(),
    )]
    pub session_ttl: u32,
}

impl SessionArgs {
    const fn default_session_ttl() -> u32 {
        60 * 60
    }
}
