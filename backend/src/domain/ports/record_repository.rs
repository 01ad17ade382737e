//! Port for tenant record persistence, generic over the record collection.
//!
//! One adapter instance serves one collection. Foreign keys between
//! collections are enforced by the adapter and surface as
//! [`RecordRepositoryError::UnknownReference`] or
//! [`RecordRepositoryError::InUse`].

use async_trait::async_trait;

use crate::domain::{OrganizationId, RecordFields, RecordId, TenantRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record repository adapters.
    pub enum RecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "record repository query failed: {message}",
        /// A referenced record does not exist in the organization.
        UnknownReference { field: String } =>
            "{field} does not reference an existing record",
        /// A unique field is already taken in the organization.
        Duplicate { field: String } =>
            "{field} is already in use",
        /// Other records still reference the one being deleted.
        InUse { message: String } =>
            "record is still referenced: {message}",
    }
}

/// Storage for one record collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository<F: RecordFields>: Send + Sync {
    /// Records of the organization, newest first.
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<TenantRecord<F>>, RecordRepositoryError>;

    /// One record, if it exists in the organization.
    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
    ) -> Result<Option<TenantRecord<F>>, RecordRepositoryError>;

    /// Store a new record.
    async fn insert(&self, record: &TenantRecord<F>) -> Result<(), RecordRepositoryError>;

    /// Replace a stored record. Returns `false` when no row matched.
    async fn update(&self, record: &TenantRecord<F>) -> Result<bool, RecordRepositoryError>;

    /// Remove a record. Returns `false` when no row matched.
    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
    ) -> Result<bool, RecordRepositoryError>;
}
