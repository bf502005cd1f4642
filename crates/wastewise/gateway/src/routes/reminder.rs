use actix_web::{
    get, post,
    web::{Data, Json},
    Responder,
};
use tracing::{instrument, Level};
use wastewise_api::reminder::ReminderRequest;
use wastewise_core::error::ApiError;

use crate::reminder::ReminderService;

#[instrument(level = Level::INFO, skip(reminders))]
#[post("/toggle")]
pub async fn toggle(
    reminders: Data<ReminderService>,
    request: Json<ReminderRequest>,
) -> impl Responder {
    let result = reminders
        .toggle(request.into_inner())
        .map_err(|error| ApiError::from(error).into());
    super::respond(result)
}

#[instrument(level = Level::INFO, skip(reminders))]
#[get("")]
pub async fn list(reminders: Data<ReminderService>) -> impl Responder {
    super::respond(Ok(reminders.list()))
}

#[instrument(level = Level::INFO, skip(reminders))]
#[get("/notifications")]
pub async fn list_notifications(reminders: Data<ReminderService>) -> impl Responder {
    super::respond(Ok(reminders.drain_notifications()))
}
