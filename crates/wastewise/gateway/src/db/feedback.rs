use anyhow::Result;
use sea_orm::{ActiveModelTrait, DbErr, DeleteResult, EntityTrait, QuerySelect};
use tracing::{instrument, Level};
use wastewise_api::{
    feedback::{Feedback, FeedbackSpec, FeedbackSummary},
    model::{Id, Page},
};

use super::Database;

impl Database {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_feedback(&self, page: Page) -> Result<Vec<Feedback>> {
        let col_id = entity::feedback::Column::Id;
        let dsl = super::paginate(entity::feedback::Entity::find(), col_id, page);

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_feedback(&self, spec: FeedbackSpec) -> Result<Feedback> {
        let model = entity::feedback::ActiveModel::from_spec(spec, None);

        model
            .insert(&self.connection)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_feedback(&self, id: Id, spec: FeedbackSpec) -> Result<Option<Feedback>> {
        let model = entity::feedback::ActiveModel::from_spec(spec, Some(id));

        match model.update(&self.connection).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_feedback(&self, id: Id) -> Result<bool> {
        let model = entity::feedback::ActiveModel::from_id(id);
        let dsl = entity::feedback::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn summarize_feedback(&self) -> Result<FeedbackSummary> {
        let col_rating = entity::feedback::Column::Rating;
        let dsl = entity::feedback::Entity::find()
            .select_only()
            .column(col_rating);

        let ratings: Vec<i32> = dsl.into_tuple().all(&self.connection).await?;
        Ok(ratings.into_iter().collect())
    }
}
