//! Driving port for record reads.

use async_trait::async_trait;

use crate::domain::{Error, OrganizationId, RecordFields, RecordId, TenantRecord};

/// List and fetch records of one collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordQuery<F: RecordFields>: Send + Sync {
    /// Records of the organization, newest first.
    async fn list(&self, organization_id: &OrganizationId) -> Result<Vec<TenantRecord<F>>, Error>;

    /// One record.
    async fn get(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
    ) -> Result<TenantRecord<F>, Error>;
}
