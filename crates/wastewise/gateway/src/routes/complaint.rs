use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    Responder,
};
use anyhow::Result;
use tracing::{instrument, Level};
use wastewise_api::{
    complaint::{Complaint, ComplaintSpec},
    model::{Id, Message, Page},
};

use crate::db::Database;

const NOT_FOUND: &str = "Complain not found";

#[instrument(level = Level::INFO, skip(db, spec))]
#[post("/saved")]
pub async fn save(db: Data<Database>, spec: Json<ComplaintSpec>) -> impl Responder {
    super::respond(try_save(&db, spec.into_inner()).await)
}

async fn try_save(db: &Database, spec: ComplaintSpec) -> Result<Message> {
    super::validated(spec.validate())?;
    let complaint = db.insert_complaint(spec).await?;
    Ok(format!("Saved complain from {}", &complaint.spec.name))
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get-all-complains")]
pub async fn list(db: Data<Database>, page: Query<Page>) -> impl Responder {
    super::respond(db.list_complaints(page.into_inner()).await)
}

#[instrument(level = Level::INFO, skip(db, spec))]
#[put("/update-complain/{id}")]
pub async fn update(
    db: Data<Database>,
    path: Path<Id>,
    spec: Json<ComplaintSpec>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&db, id, spec.into_inner()).await)
}

async fn try_update(db: &Database, id: Id, spec: ComplaintSpec) -> Result<Complaint> {
    super::validated(spec.validate())?;
    super::found(db.update_complaint(id, spec).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[delete("/delete-complain/{id}")]
pub async fn delete(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&db, id).await)
}

async fn try_delete(db: &Database, id: Id) -> Result<Message> {
    super::deleted(id, db.remove_complaint(id).await?, NOT_FOUND)
}
