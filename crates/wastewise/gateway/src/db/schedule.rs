use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, DeleteResult, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{instrument, Level};
use wastewise_api::{
    model::{Id, Page},
    schedule::{Schedule, ScheduleSpec},
};

use super::Database;

impl Database {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_schedules(&self, page: Page) -> Result<Vec<Schedule>> {
        let col_id = entity::schedule::Column::Id;
        let dsl = super::paginate(entity::schedule::Entity::find(), col_id, page);

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    /// Lists the schedules falling within `[start, end]`, earliest first.
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_schedules_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Schedule>> {
        let col_date = entity::schedule::Column::Date;
        let col_time = entity::schedule::Column::Time;
        let dsl = entity::schedule::Entity::find()
            .filter(col_date.between(start, end))
            .order_by_asc(col_date)
            .order_by_asc(col_time);

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_schedule(&self, spec: ScheduleSpec) -> Result<Schedule> {
        let model = entity::schedule::ActiveModel::from_spec(spec, None);

        model
            .insert(&self.connection)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_schedule(&self, id: Id, spec: ScheduleSpec) -> Result<Option<Schedule>> {
        let model = entity::schedule::ActiveModel::from_spec(spec, Some(id));

        match model.update(&self.connection).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_schedule(&self, id: Id) -> Result<bool> {
        let model = entity::schedule::ActiveModel::from_id(id);
        let dsl = entity::schedule::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }
}
