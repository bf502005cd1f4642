use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, DbErr, DeleteResult, EntityTrait};
use tracing::{instrument, Level};
use wastewise_api::{
    bin::{BinLocation, BinLocationSpec},
    model::{Id, Page},
};

use super::Database;

impl Database {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn get_bin_location(&self, id: Id) -> Result<Option<BinLocation>> {
        let dsl = entity::bin_location::Entity::find_by_id(id);

        dsl.one(&self.connection)
            .await
            .map(|model| model.map(Into::into))
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_bin_locations(&self, page: Page) -> Result<Vec<BinLocation>> {
        let col_id = entity::bin_location::Column::Id;
        let dsl = super::paginate(entity::bin_location::Entity::find(), col_id, page);

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_bin_location(
        &self,
        spec: BinLocationSpec,
        now: NaiveDateTime,
    ) -> Result<BinLocation> {
        let now = spec.last_updated.unwrap_or(now);
        let model = entity::bin_location::ActiveModel::from_spec(spec, None, now);

        model
            .insert(&self.connection)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    /// Replaces the whole record, returning `None` when it does not exist.
    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_bin_location(
        &self,
        id: Id,
        spec: BinLocationSpec,
        now: NaiveDateTime,
    ) -> Result<Option<BinLocation>> {
        let model = entity::bin_location::ActiveModel::from_spec(spec, Some(id), now);

        match model.update(&self.connection).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_bin_location(&self, id: Id) -> Result<bool> {
        let model = entity::bin_location::ActiveModel::from_id(id);
        let dsl = entity::bin_location::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }
}
