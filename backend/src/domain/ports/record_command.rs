//! Driving port for record mutations.

use async_trait::async_trait;

use crate::domain::{Error, OrganizationId, RecordFields, RecordId, TenantRecord};

/// Create, replace and delete records of one collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordCommand<F: RecordFields>: Send + Sync {
    /// Validate and store new fields.
    async fn create(
        &self,
        organization_id: &OrganizationId,
        fields: F,
    ) -> Result<TenantRecord<F>, Error>;

    /// Validate and replace every field of an existing record.
    async fn replace(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
        fields: F,
    ) -> Result<TenantRecord<F>, Error>;

    /// Delete a record.
    async fn delete(&self, organization_id: &OrganizationId, id: &RecordId) -> Result<(), Error>;
}
