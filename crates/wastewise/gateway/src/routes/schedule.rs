use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    Responder,
};
use anyhow::Result;
use chrono::Duration;
use tracing::{instrument, Level};
use wastewise_api::{
    calendar::{
        bucket_by_weekday, rotation, Calendar, CalendarDay, CalendarFilters, CalendarQuery,
        RotationWeek, RouteTable, WeekdayBucket,
    },
    model::{Id, Message, Page},
    schedule::{Schedule, ScheduleSpec},
};
use wastewise_core::error::ApiError;

use crate::{clock::Clock, db::Database};

const NOT_FOUND: &str = "Schedule not found";

#[instrument(level = Level::INFO, skip(db, spec))]
#[post("/saved")]
pub async fn save(db: Data<Database>, spec: Json<ScheduleSpec>) -> impl Responder {
    super::respond(try_save(&db, spec.into_inner()).await)
}

async fn try_save(db: &Database, spec: ScheduleSpec) -> Result<Message> {
    super::validated(spec.validate())?;
    db.insert_schedule(spec).await?;
    Ok("Schedule saved successfully".into())
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/get-all-schedule")]
pub async fn list(db: Data<Database>, page: Query<Page>) -> impl Responder {
    super::respond(db.list_schedules(page.into_inner()).await)
}

#[instrument(level = Level::INFO, skip(db, spec))]
#[put("/update/{schedule_id}")]
pub async fn update(
    db: Data<Database>,
    path: Path<Id>,
    spec: Json<ScheduleSpec>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&db, id, spec.into_inner()).await)
}

async fn try_update(db: &Database, id: Id, spec: ScheduleSpec) -> Result<Schedule> {
    super::validated(spec.validate())?;
    super::found(db.update_schedule(id, spec).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db))]
#[delete("/delete-schedule/{schedule_id}")]
pub async fn delete(db: Data<Database>, path: Path<Id>) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&db, id).await)
}

async fn try_delete(db: &Database, id: Id) -> Result<Message> {
    super::deleted(id, db.remove_schedule(id).await?, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db, clock, routes))]
#[get("/calendar")]
pub async fn calendar_day(
    db: Data<Database>,
    clock: Data<Clock>,
    routes: Data<RouteTable>,
    query: Query<CalendarQuery>,
) -> impl Responder {
    super::respond(try_calendar_day(&db, &clock, &routes, query.into_inner()).await)
}

async fn try_calendar_day(
    db: &Database,
    clock: &Clock,
    routes: &RouteTable,
    query: CalendarQuery,
) -> Result<CalendarDay> {
    let filter = query.filter().map_err(ApiError::from)?;
    let today = clock.today();
    let date = query.date.unwrap_or(today);

    let schedules = db.list_schedules_between(date, date).await?;
    Calendar::new(routes, &schedules)
        .day(date, today, &filter)
        .map_err(|error| ApiError::from(error).into())
}

#[instrument(level = Level::INFO, skip(db, clock, routes))]
#[get("/calendar/week")]
pub async fn calendar_week(
    db: Data<Database>,
    clock: Data<Clock>,
    routes: Data<RouteTable>,
    query: Query<CalendarQuery>,
) -> impl Responder {
    super::respond(try_calendar_week(&db, &clock, &routes, query.into_inner()).await)
}

async fn try_calendar_week(
    db: &Database,
    clock: &Clock,
    routes: &RouteTable,
    query: CalendarQuery,
) -> Result<Vec<CalendarDay>> {
    let filter = query.filter().map_err(ApiError::from)?;
    let today = clock.today();
    let start = query.date.unwrap_or(today);

    let schedules = db
        .list_schedules_between(start, start + Duration::days(6))
        .await?;
    Calendar::new(routes, &schedules)
        .week(start, today, &filter)
        .map_err(|error| ApiError::from(error).into())
}

#[instrument(level = Level::INFO, skip(db, routes))]
#[get("/calendar/filters")]
pub async fn calendar_filters(db: Data<Database>, routes: Data<RouteTable>) -> impl Responder {
    super::respond(try_calendar_filters(&db, &routes).await)
}

async fn try_calendar_filters(db: &Database, routes: &RouteTable) -> Result<CalendarFilters> {
    let schedules = db.list_schedules(Page::default()).await?;
    Ok(Calendar::new(routes, &schedules).filters())
}

#[instrument(level = Level::INFO, skip(db))]
#[get("/calendar/weekdays")]
pub async fn calendar_weekdays(db: Data<Database>) -> impl Responder {
    super::respond(try_calendar_weekdays(&db).await)
}

async fn try_calendar_weekdays(db: &Database) -> Result<Vec<WeekdayBucket>> {
    let schedules = db.list_schedules(Page::default()).await?;
    Ok(bucket_by_weekday(&schedules))
}

#[instrument(level = Level::INFO, skip(clock))]
#[get("/calendar/rotation")]
pub async fn calendar_rotation(clock: Data<Clock>, query: Query<CalendarQuery>) -> impl Responder {
    super::respond(try_calendar_rotation(&clock, &query))
}

fn try_calendar_rotation(clock: &Clock, query: &CalendarQuery) -> Result<RotationWeek> {
    let filter = query.filter().map_err(ApiError::from)?;
    let today = clock.today();
    let start = query.date.unwrap_or(today);

    rotation(start, today, filter.waste_type)
        .map_err(|error| ApiError::from(error).into())
}
