use anyhow::{anyhow, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DbErr, DeleteResult, EntityTrait, QueryFilter,
    QuerySelect, TransactionError, TransactionTrait,
};
use tracing::{instrument, Level};
use wastewise_api::{
    model::{Id, Page},
    request::{
        RequestAssignment, RequestDraft, RequestFilter, RequestSpec, RequestStats, RequestStatus,
        ServiceRequest, WorkflowError,
    },
};
use wastewise_core::error::ApiError;

use super::Database;

impl Database {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn get_request(&self, id: Id) -> Result<Option<ServiceRequest>> {
        let dsl = entity::request::Entity::find_by_id(id);

        dsl.one(&self.connection)
            .await
            .map_err(Into::into)
            .and_then(|model| model.map(TryInto::try_into).transpose())
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_requests(
        &self,
        page: Page,
        filter: RequestFilter,
    ) -> Result<Vec<ServiceRequest>> {
        let RequestFilter { status } = filter;

        let col_id = entity::request::Column::Id;
        let col_status = entity::request::Column::Status;
        let dsl = super::paginate(entity::request::Entity::find(), col_id, page);
        let dsl = match status {
            Some(status) => dsl.filter(col_status.eq(entity::request::RequestStatus::from(status))),
            None => dsl,
        };

        dsl.all(&self.connection)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_request(&self, spec: RequestSpec) -> Result<ServiceRequest> {
        let model = entity::request::ActiveModel::from_spec(spec, None)?;

        model
            .insert(&self.connection)
            .await
            .map_err(Into::into)
            .and_then(TryInto::try_into)
    }

    /// Applies a citizen edit, keeping the workflow state and the crew.
    #[instrument(level = Level::INFO, skip(self, draft))]
    pub async fn update_request(
        &self,
        id: Id,
        draft: RequestDraft,
    ) -> Result<Option<ServiceRequest>> {
        self.replace_request(id, move |stored| {
            let mut model =
                entity::request::ActiveModel::from_spec(draft.merge_into(stored), Some(id))?;
            model.assigned_cleaners = ActiveValue::NotSet;
            Ok(model)
        })
        .await
    }

    #[instrument(level = Level::INFO, skip(self, assignment))]
    pub async fn assign_request(
        &self,
        id: Id,
        assignment: RequestAssignment,
    ) -> Result<Option<ServiceRequest>> {
        self.replace_request(id, move |stored| {
            entity::request::ActiveModel::from_spec(assignment.apply(stored), Some(id))
        })
        .await
    }

    /// Rewrites a stored request in one transaction.
    ///
    /// The status column is never written here; only
    /// [`Self::update_request_status`] moves a request along its workflow.
    async fn replace_request<F>(&self, id: Id, edit: F) -> Result<Option<ServiceRequest>>
    where
        F: 'static + Send + FnOnce(RequestSpec) -> Result<entity::request::ActiveModel>,
    {
        let model = self
            .connection
            .transaction::<_, _, DbErr>(|txn| {
                Box::pin(async move {
                    let stored = match entity::request::Entity::find_by_id(id).one(txn).await? {
                        Some(model) => ServiceRequest::try_from(model)
                            .map_err(|error| DbErr::Custom(error.to_string()))?,
                        None => return Ok(None),
                    };

                    let mut model =
                        edit(stored.spec).map_err(|error| DbErr::Custom(error.to_string()))?;
                    model.status = ActiveValue::NotSet;

                    match model.update(txn).await {
                        Ok(model) => Ok(Some(model)),
                        Err(DbErr::RecordNotUpdated) => Ok(None),
                        Err(error) => Err(error),
                    }
                })
            })
            .await
            .map_err(|error| match error {
                TransactionError::Connection(error) => {
                    anyhow!("failed to connect to DB while updating a request: {error}")
                }
                TransactionError::Transaction(error) => {
                    anyhow!("failed to update a request: {error}")
                }
            })?;

        model.map(TryInto::try_into).transpose()
    }

    /// Moves the request along its workflow, refusing forbidden transitions.
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn update_request_status(
        &self,
        id: Id,
        target: RequestStatus,
    ) -> Result<Option<ServiceRequest>> {
        let model = self
            .connection
            .transaction::<_, _, DbErr>(|txn| {
                Box::pin(async move {
                    let stored = match entity::request::Entity::find_by_id(id).one(txn).await? {
                        Some(model) => model,
                        None => return Ok(Ok(None)),
                    };

                    let current = RequestStatus::from(stored.status);
                    let next = match current.transition(target) {
                        Ok(next) => next,
                        Err(error) => return Ok(Err(error)),
                    };
                    if next == current {
                        return Ok(Ok(Some(stored)));
                    }

                    let mut model = entity::request::ActiveModel::from_id(id);
                    model.status = ActiveValue::Set(next.into());
                    model.update(txn).await.map(|model| Ok(Some(model)))
                })
            })
            .await
            .map_err(|error| match error {
                TransactionError::Connection(error) => {
                    anyhow!("failed to connect to DB while updating a request status: {error}")
                }
                TransactionError::Transaction(error) => {
                    anyhow!("failed to update a request status: {error}")
                }
            })?
            .map_err(|error: WorkflowError| ApiError::from(error))?;

        model.map(TryInto::try_into).transpose()
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_request(&self, id: Id) -> Result<bool> {
        let model = entity::request::ActiveModel::from_id(id);
        let dsl = entity::request::Entity::delete(model);

        let DeleteResult { rows_affected } = dsl.exec(&self.connection).await?;
        Ok(rows_affected > 0)
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn request_stats(&self) -> Result<RequestStats> {
        let col_status = entity::request::Column::Status;
        let dsl = entity::request::Entity::find()
            .select_only()
            .column(col_status);

        let statuses: Vec<entity::request::RequestStatus> =
            dsl.into_tuple().all(&self.connection).await?;
        Ok(statuses
            .into_iter()
            .map(RequestStatus::from)
            .collect::<Vec<_>>()
            .iter()
            .collect())
    }
}
