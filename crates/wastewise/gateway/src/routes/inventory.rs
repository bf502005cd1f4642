use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    Responder,
};
use anyhow::Result;
use tracing::{instrument, Level};
use wastewise_api::{
    inventory::{BinInventory, BinInventorySpec},
    model::{Id, Message, Page},
};

use crate::db::Database;

const NOT_FOUND: &str = "Bin Not Found";

#[instrument(level = Level::INFO, skip(db, spec))]
#[post("/saved")]
pub async fn save(db: Data<Database>, spec: Json<BinInventorySpec>) -> impl Responder {
    super::respond(try_save(&db, spec.into_inner()).await)
}

async fn try_save(db: &Database, spec: BinInventorySpec) -> Result<Message> {
    super::validated(spec.validate())?;
    let bin = db.insert_bin_inventory(spec).await?;
    Ok(format!("Saved {}", &bin.spec.address))
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get-all-BinLocations")]
pub async fn list(db: Data<Database>, page: Query<Page>) -> impl Responder {
    super::respond(db.list_bin_inventory(page.into_inner()).await)
}

#[instrument(level = Level::INFO, skip(db, spec))]
#[put("/update/{bin_id}")]
pub async fn update(
    db: Data<Database>,
    path: Path<Id>,
    spec: Json<BinInventorySpec>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&db, id, spec.into_inner()).await)
}

async fn try_update(db: &Database, id: Id, spec: BinInventorySpec) -> Result<BinInventory> {
    super::validated(spec.validate())?;
    super::found(db.update_bin_inventory(id, spec).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[delete("/delete-BinLocations/{id}")]
pub async fn delete(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&db, id).await)
}

async fn try_delete(db: &Database, id: Id) -> Result<Message> {
    super::deleted(id, db.remove_bin_inventory(id).await?, NOT_FOUND)
}
