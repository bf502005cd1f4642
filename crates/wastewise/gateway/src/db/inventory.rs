use anyhow::Result;
use sea_orm::{ActiveModelTrait, DbErr, DeleteResult, EntityTrait};
use tracing::{instrument, Level};
use wastewise_api::{
    inventory::{BinInventory, BinInventorySpec},
    model::{Id, Page},
};

use super::Database;

impl Database {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_bin_inventory(&self, page: Page) -> Result<Vec<BinInventory>> {
        let col_id = entity::bin_inventory::Column::Id;
        let dsl = super::paginate(entity::bin_inventory::Entity::find(), col_id, page);

        dsl.all(&self.connection)
            .await
            .map(|models| models.into_iter().map(Into::into).collect())
            .map_err(Into::into)
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_bin_inventory(&self, spec: BinInventorySpec) -> Result<BinInventory> {
        let model = entity::bin_inventory::ActiveModel::from_spec(spec, None);

        model
            .insert(&self.connection)
            .await
            .map(Into::into)
            .map_err(Into::into)
    }

    /// Applies an operator edit while keeping the stored status code.
    #[instrument(level = Level::INFO, skip(self, update))]
    pub async fn update_bin_inventory(
        &self,
        id: Id,
        update: BinInventorySpec,
    ) -> Result<Option<BinInventory>> {
        let stored = match entity::bin_inventory::Entity::find_by_id(id)
            .one(&self.connection)
            .await?
        {
            Some(model) => BinInventory::from(model).spec,
            None => return Ok(None),
        };

        let spec = stored.merge_update(update);
        let model = entity::bin_inventory::ActiveModel::from_spec(spec, Some(id));
        match model.update(&self.connection).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_bin_inventory(&self, id: Id) -> Result<bool> {
        let model = entity::bin_inventory::ActiveModel::from_id(id);
        let dsl = entity::bin_inventory::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }
}
