use anyhow::Result;
use sea_orm::{ActiveModelTrait, DbErr, DeleteResult, EntityTrait};
use tracing::{instrument, Level};
use wastewise_api::{
    complaint::{Complaint, ComplaintSpec},
    model::{Id, Page},
};

use super::Database;

impl Database {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_complaints(&self, page: Page) -> Result<Vec<Complaint>> {
        let col_id = entity::complaint::Column::Id;
        let dsl = super::paginate(entity::complaint::Entity::find(), col_id, page);

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_complaint(&self, spec: ComplaintSpec) -> Result<Complaint> {
        let model = entity::complaint::ActiveModel::from_spec(spec, None);

        model
            .insert(&self.connection)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_complaint(
        &self,
        id: Id,
        spec: ComplaintSpec,
    ) -> Result<Option<Complaint>> {
        let model = entity::complaint::ActiveModel::from_spec(spec, Some(id));

        match model.update(&self.connection).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_complaint(&self, id: Id) -> Result<bool> {
        let model = entity::complaint::ActiveModel::from_id(id);
        let dsl = entity::complaint::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }
}
