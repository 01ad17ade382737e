//! Record service shared by every tenant record collection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{RecordCommand, RecordQuery, RecordRepository, RecordRepositoryError};
use crate::domain::{Error, OrganizationId, RecordFields, RecordId, TenantRecord};

/// Service implementing [`RecordCommand`] and [`RecordQuery`] for one
/// collection.
pub struct RecordService<F, R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    fields: PhantomData<fn() -> F>,
}

impl<F, R> Clone for RecordService<F, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            fields: PhantomData,
        }
    }
}

impl<F, R> RecordService<F, R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            fields: PhantomData,
        }
    }
}

fn map_repository_error<F: RecordFields>(error: RecordRepositoryError) -> Error {
    let label = F::KIND.label();
    match error {
        RecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{label} repository unavailable: {message}"))
        }
        RecordRepositoryError::Query { message } => {
            Error::internal(format!("{label} repository error: {message}"))
        }
        RecordRepositoryError::UnknownReference { field } => Error::invalid_request(format!(
            "{field} does not reference an existing record"
        ))
        .with_details(json!({ "field": field, "code": "unknown_reference" })),
        RecordRepositoryError::Duplicate { field } => {
            Error::conflict(format!("{field} is already in use"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
        RecordRepositoryError::InUse { message } => {
            Error::conflict(format!("{label} is still referenced: {message}"))
                .with_details(json!({ "code": "in_use" }))
        }
    }
}

fn not_found<F: RecordFields>(id: &RecordId) -> Error {
    Error::not_found(format!("{} {id} not found", F::KIND.label()))
}

#[async_trait]
impl<F, R> RecordQuery<F> for RecordService<F, R>
where
    F: RecordFields,
    R: RecordRepository<F>,
{
    async fn list(&self, organization_id: &OrganizationId) -> Result<Vec<TenantRecord<F>>, Error> {
        self.repository
            .list(organization_id)
            .await
            .map_err(map_repository_error::<F>)
    }

    async fn get(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
    ) -> Result<TenantRecord<F>, Error> {
        self.repository
            .find(organization_id, id)
            .await
            .map_err(map_repository_error::<F>)?
            .ok_or_else(|| not_found::<F>(id))
    }
}

#[async_trait]
impl<F, R> RecordCommand<F> for RecordService<F, R>
where
    F: RecordFields,
    R: RecordRepository<F>,
{
    async fn create(
        &self,
        organization_id: &OrganizationId,
        fields: F,
    ) -> Result<TenantRecord<F>, Error> {
        let record = TenantRecord::create(*organization_id, fields.normalise()?, self.clock.utc());
        self.repository
            .insert(&record)
            .await
            .map_err(map_repository_error::<F>)?;
        Ok(record)
    }

    async fn replace(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
        fields: F,
    ) -> Result<TenantRecord<F>, Error> {
        let fields = fields.normalise()?;
        let existing = self.get(organization_id, id).await?;
        let record = existing.replace(fields, self.clock.utc());
        if !self
            .repository
            .update(&record)
            .await
            .map_err(map_repository_error::<F>)?
        {
            return Err(not_found::<F>(id));
        }
        Ok(record)
    }

    async fn delete(&self, organization_id: &OrganizationId, id: &RecordId) -> Result<(), Error> {
        if !self
            .repository
            .delete(organization_id, id)
            .await
            .map_err(map_repository_error::<F>)?
        {
            return Err(not_found::<F>(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "record_service_tests.rs"]
mod tests;
