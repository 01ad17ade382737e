//! Tenant-owned operational records.
//!
//! Waste points, vendors, schedules, invoices and certifications share one
//! lifecycle: validate client fields, stamp them with identity and times, and
//! store them under the caller's organization. [`TenantRecord`] carries the
//! shared envelope; each entity only defines its [`RecordFields`].

mod certification;
mod invoice;
mod schedule;
mod validation;
mod vendor;
mod waste_point;

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::vocabulary::{text_enum, uuid_identifier};
use super::OrganizationId;

pub use certification::{Certification, CertificationFields, CertificationStatus};
pub use invoice::{Invoice, InvoiceFields, InvoiceStatus};
pub use schedule::{PickupFrequency, Schedule, ScheduleFields, ScheduleStatus};
pub use validation::RecordValidationError;
pub use vendor::{Vendor, VendorFields, VendorStatus};
pub use waste_point::{WastePoint, WastePointFields, WasteType};

uuid_identifier! {
    /// Identifier shared by every record collection.
    RecordId
}

text_enum! {
    /// Record collection.
    pub enum RecordKind as "record kind" {
        /// Collection or drop-off location.
        WastePoint => "waste_point",
        /// Haulier or processor.
        Vendor => "vendor",
        /// Planned pickup.
        Schedule => "schedule",
        /// Vendor invoice.
        Invoice => "invoice",
        /// Compliance certificate.
        Certification => "certification",
    }
}

impl RecordKind {
    /// Human-readable singular label for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WastePoint => "waste point",
            Self::Vendor => "vendor",
            Self::Schedule => "schedule",
            Self::Invoice => "invoice",
            Self::Certification => "certification",
        }
    }
}

/// Foreign key held by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordReference {
    /// Wire name of the referencing field.
    pub field: &'static str,
    /// Collection the id points into.
    pub kind: RecordKind,
    /// Referenced record.
    pub id: RecordId,
}

/// Client-editable fields of one record collection.
pub trait RecordFields:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection these fields belong to.
    const KIND: RecordKind;

    /// Trim, default and check client input.
    ///
    /// # Errors
    ///
    /// Returns the first [`RecordValidationError`] found.
    fn normalise(self) -> Result<Self, RecordValidationError>;

    /// Foreign keys that must resolve inside the same organization.
    fn references(&self) -> Vec<RecordReference>;
}

/// A stored record: identity, tenant, times and entity fields.
///
/// Fields are flattened on the wire, so a vendor serialises as
/// `{"id", "organizationId", "name", ..., "createdAt", "updatedAt"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord<F> {
    id: RecordId,
    organization_id: OrganizationId,
    #[serde(flatten)]
    fields: F,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<F: RecordFields> TenantRecord<F> {
    /// Create a record from already normalised fields.
    #[must_use]
    pub fn create(organization_id: OrganizationId, fields: F, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::random(),
            organization_id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a record read from storage.
    #[must_use]
    pub const fn from_parts(
        id: RecordId,
        organization_id: OrganizationId,
        fields: F,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            organization_id,
            fields,
            created_at,
            updated_at,
        }
    }

    /// Replace every client field, keeping identity and creation time.
    #[must_use]
    pub fn replace(self, fields: F, now: DateTime<Utc>) -> Self {
        Self {
            fields,
            updated_at: now,
            ..self
        }
    }

    /// Collection of this record.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        F::KIND
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    /// Entity fields.
    #[must_use]
    pub const fn fields(&self) -> &F {
        &self.fields
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
