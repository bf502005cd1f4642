use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    Responder,
};
use anyhow::Result;
use tracing::{instrument, Level};
use wastewise_api::{
    bin::{nearest, BinLocation, BinLocationSpec, BinSummary, NearbyBin, NearestQuery},
    model::{Id, Message, Page},
};

use crate::{clock::Clock, db::Database};

const NOT_FOUND: &str = "Bin Location Not Found";

#[instrument(level = Level::INFO, skip(db, clock, spec))]
#[post("/save")]
pub async fn save(
    db: Data<Database>,
    clock: Data<Clock>,
    spec: Json<BinLocationSpec>,
) -> impl Responder {
    super::respond(try_save(&db, &clock, spec.into_inner()).await)
}

async fn try_save(db: &Database, clock: &Clock, spec: BinLocationSpec) -> Result<Message> {
    super::validated(spec.validate())?;
    let bin = db.insert_bin_location(spec, clock.now_naive()).await?;
    Ok(format!("Saved bin location at {}", &bin.spec.address))
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get-all")]
pub async fn list(db: Data<Database>, page: Query<Page>) -> impl Responder {
    super::respond(db.list_bin_locations(page.into_inner()).await)
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get/{id}")]
pub async fn get(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_get(&db, id).await)
}

async fn try_get(db: &Database, id: Id) -> Result<BinLocation> {
    super::found(db.get_bin_location(id).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db, clock, spec))]
#[put("/update/{id}")]
pub async fn update(
    db: Data<Database>,
    clock: Data<Clock>,
    path: Path<Id>,
    spec: Json<BinLocationSpec>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&db, &clock, id, spec.into_inner()).await)
}

async fn try_update(
    db: &Database,
    clock: &Clock,
    id: Id,
    spec: BinLocationSpec,
) -> Result<BinLocation> {
    super::validated(spec.validate())?;
    let updated = db.update_bin_location(id, spec, clock.now_naive()).await?;
    super::found(updated, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[delete("/delete/{id}")]
pub async fn delete(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&db, id).await)
}

async fn try_delete(db: &Database, id: Id) -> Result<Message> {
    super::deleted(id, db.remove_bin_location(id).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/nearest")]
pub async fn list_nearest(db: Data<Database>, query: Query<NearestQuery>) -> impl Responder {
    super::respond(try_list_nearest(&db, query.into_inner()).await)
}

async fn try_list_nearest(db: &Database, query: NearestQuery) -> Result<Vec<NearbyBin>> {
    let bins = db.list_bin_locations(Page::default()).await?;
    Ok(nearest(bins, &query))
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/summary")]
pub async fn summary(db: Data<Database>) -> impl Responder {
    super::respond(try_summary(&db).await)
}

async fn try_summary(db: &Database) -> Result<BinSummary> {
    let bins = db.list_bin_locations(Page::default()).await?;
    Ok(bins.iter().map(|bin| &bin.spec).collect())
}
