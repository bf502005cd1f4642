use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    HttpRequest, Responder,
};
use anyhow::Result;
use tracing::{instrument, Level};
use wastewise_api::{
    model::{Id, Message, Page},
    request::{
        RequestAssignment, RequestDraft, RequestFilter, RequestStatusUpdate, ServiceRequest,
        WorkflowError,
    },
    user::ROLE_ADMIN,
};
use wastewise_core::error::ApiError;

use crate::{clock::Clock, db::Database, session::SessionStore};

const NOT_FOUND: &str = "Request Not Found";

#[instrument(level = Level::INFO, skip(db, clock, draft))]
#[post("/save")]
pub async fn save(
    db: Data<Database>,
    clock: Data<Clock>,
    draft: Json<RequestDraft>,
) -> impl Responder {
    super::respond(try_save(&db, &clock, draft.into_inner()).await)
}

async fn try_save(db: &Database, clock: &Clock, draft: RequestDraft) -> Result<Message> {
    super::validated(draft.validate())?;
    let request = db.insert_request(draft.into_spec(clock.now_naive())).await?;
    Ok(format!(
        "Request saved for {name} with {n} cleaners!",
        name = &request.spec.requester_name,
        n = request.spec.number_of_cleaners,
    ))
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get-all-request")]
pub async fn list(
    db: Data<Database>,
    page: Query<Page>,
    filter: Query<RequestFilter>,
) -> impl Responder {
    super::respond(db.list_requests(page.into_inner(), filter.into_inner()).await)
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/stats")]
pub async fn stats(db: Data<Database>) -> impl Responder {
    super::respond(db.request_stats().await)
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get/{request_id}")]
pub async fn get(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_get(&db, id).await)
}

async fn try_get(db: &Database, id: Id) -> Result<ServiceRequest> {
    super::found(db.get_request(id).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db, draft))]
#[put("/update/{request_id}")]
pub async fn update(
    db: Data<Database>,
    path: Path<Id>,
    draft: Json<RequestDraft>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&db, id, draft.into_inner()).await)
}

async fn try_update(db: &Database, id: Id, draft: RequestDraft) -> Result<ServiceRequest> {
    super::validated(draft.validate())?;
    super::found(db.update_request(id, draft).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[put("/{request_id}/update-status")]
pub async fn update_status(
    db: Data<Database>,
    path: Path<Id>,
    status_update: Json<RequestStatusUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update_status(&db, id, status_update.into_inner()).await)
}

async fn try_update_status(
    db: &Database,
    id: Id,
    status_update: RequestStatusUpdate,
) -> Result<ServiceRequest> {
    let status = status_update
        .status
        .ok_or_else(|| ApiError::from(WorkflowError::MissingStatus))?;
    super::found(db.update_request_status(id, status).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(request, db, sessions, assignment))]
#[put("/{request_id}/assign")]
pub async fn assign(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
    path: Path<Id>,
    assignment: Json<RequestAssignment>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_assign(&request, &db, &sessions, id, assignment.into_inner()).await)
}

async fn try_assign(
    request: &HttpRequest,
    db: &Database,
    sessions: &SessionStore,
    id: Id,
    assignment: RequestAssignment,
) -> Result<ServiceRequest> {
    super::authorize(db, sessions, request, &[ROLE_ADMIN]).await?;
    super::found(db.assign_request(id, assignment).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[delete("/delete-request/{request_id}")]
pub async fn delete(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&db, id).await)
}

async fn try_delete(db: &Database, id: Id) -> Result<Message> {
    super::deleted(id, db.remove_request(id).await?, NOT_FOUND)
}
