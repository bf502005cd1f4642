use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    Responder,
};
use anyhow::Result;
use tracing::{instrument, Level};
use wastewise_api::{
    feedback::{Feedback, FeedbackSpec},
    model::{Id, Message, Page},
};

use crate::db::Database;

const NOT_FOUND: &str = "Feedback not found";

#[instrument(level = Level::INFO, skip(db, spec))]
#[post("/saved")]
pub async fn save(db: Data<Database>, spec: Json<FeedbackSpec>) -> impl Responder {
    super::respond(try_save(&db, spec.into_inner()).await)
}

async fn try_save(db: &Database, spec: FeedbackSpec) -> Result<Message> {
    super::validated(spec.validate())?;
    let feedback = db.insert_feedback(spec).await?;
    Ok(format!("Saved feedback from {}", &feedback.spec.username))
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get-all-FeedBack")]
pub async fn list(db: Data<Database>, page: Query<Page>) -> impl Responder {
    super::respond(db.list_feedback(page.into_inner()).await)
}

#[instrument(level = Level::INFO, skip(db, spec))]
#[put("/update/{feedback_id}")]
pub async fn update(
    db: Data<Database>,
    path: Path<Id>,
    spec: Json<FeedbackSpec>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&db, id, spec.into_inner()).await)
}

async fn try_update(db: &Database, id: Id, spec: FeedbackSpec) -> Result<Feedback> {
    super::validated(spec.validate())?;
    super::found(db.update_feedback(id, spec).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[delete("/delete-feedBack/{id}")]
pub async fn delete(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&db, id).await)
}

async fn try_delete(db: &Database, id: Id) -> Result<Message> {
    super::deleted(id, db.remove_feedback(id).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/summary")]
pub async fn summary(db: Data<Database>) -> impl Responder {
    super::respond(db.summarize_feedback().await)
}
