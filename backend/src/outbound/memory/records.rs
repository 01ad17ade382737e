//! Record collections sharing one table set so references can be checked.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{
    Certification, CertificationFields, Invoice, InvoiceFields, OrganizationId, RecordFields,
    RecordId, RecordKind, Schedule, ScheduleFields, TenantRecord, Vendor, VendorFields,
    WastePoint, WastePointFields,
};

use super::POISONED;

/// Rows of every record collection.
#[derive(Debug, Default)]
pub struct RecordTables {
    waste_points: Vec<WastePoint>,
    vendors: Vec<Vendor>,
    schedules: Vec<Schedule>,
    invoices: Vec<Invoice>,
    certifications: Vec<Certification>,
}

fn holds<F: RecordFields>(rows: &[TenantRecord<F>], organization_id: &OrganizationId, id: &RecordId) -> bool {
    rows.iter()
        .any(|row| row.organization_id() == organization_id && row.id() == id)
}

fn refers_to<F: RecordFields>(
    rows: &[TenantRecord<F>],
    organization_id: &OrganizationId,
    kind: RecordKind,
    id: &RecordId,
) -> bool {
    rows.iter()
        .filter(|row| row.organization_id() == organization_id)
        .flat_map(|row| row.fields().references())
        .any(|reference| reference.kind == kind && reference.id == *id)
}

impl RecordTables {
    fn contains(&self, organization_id: &OrganizationId, kind: RecordKind, id: &RecordId) -> bool {
        match kind {
            RecordKind::WastePoint => holds(&self.waste_points, organization_id, id),
            RecordKind::Vendor => holds(&self.vendors, organization_id, id),
            RecordKind::Schedule => holds(&self.schedules, organization_id, id),
            RecordKind::Invoice => holds(&self.invoices, organization_id, id),
            RecordKind::Certification => holds(&self.certifications, organization_id, id),
        }
    }

    /// First collection still pointing at the record, if any.
    fn dependent(
        &self,
        organization_id: &OrganizationId,
        kind: RecordKind,
        id: &RecordId,
    ) -> Option<&'static str> {
        if refers_to(&self.waste_points, organization_id, kind, id) {
            Some("waste points")
        } else if refers_to(&self.schedules, organization_id, kind, id) {
            Some("schedules")
        } else if refers_to(&self.invoices, organization_id, kind, id) {
            Some("invoices")
        } else {
            None
        }
    }

    fn check_references<F: RecordFields>(
        &self,
        record: &TenantRecord<F>,
    ) -> Result<(), RecordRepositoryError> {
        match record
            .fields()
            .references()
            .into_iter()
            .find(|reference| !self.contains(record.organization_id(), reference.kind, &reference.id))
        {
            Some(missing) => Err(RecordRepositoryError::unknown_reference(missing.field)),
            None => Ok(()),
        }
    }
}

/// A record collection stored in [`RecordTables`].
pub trait MemoryCollection: RecordFields {
    /// Rows of this collection.
    fn rows(tables: &RecordTables) -> &[TenantRecord<Self>];

    /// Mutable rows of this collection.
    fn rows_mut(tables: &mut RecordTables) -> &mut Vec<TenantRecord<Self>>;

    /// Field and value that must be unique within an organization.
    fn unique_key(&self) -> Option<(&'static str, &str)> {
        None
    }
}

macro_rules! memory_collection {
    ($fields:ty, $column:ident) => {
        memory_collection!($fields, $column, |_fields| None);
    };
    ($fields:ty, $column:ident, |$bound:ident| $unique:expr) => {
        impl MemoryCollection for $fields {
            fn rows(tables: &RecordTables) -> &[TenantRecord<Self>] {
                &tables.$column
            }

            fn rows_mut(tables: &mut RecordTables) -> &mut Vec<TenantRecord<Self>> {
                &mut tables.$column
            }

            fn unique_key(&self) -> Option<(&'static str, &str)> {
                let $bound = self;
                $unique
            }
        }
    };
}

memory_collection!(WastePointFields, waste_points);
memory_collection!(VendorFields, vendors);
memory_collection!(ScheduleFields, schedules);
memory_collection!(InvoiceFields, invoices, |fields| Some((
    "invoiceNumber",
    fields.invoice_number.as_str()
)));
memory_collection!(CertificationFields, certifications);

/// Shared tables handing out one repository per collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    tables: Arc<Mutex<RecordTables>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository for one collection backed by this store.
    #[must_use]
    pub fn repository<F: MemoryCollection>(&self) -> MemoryRecordRepository<F> {
        MemoryRecordRepository {
            tables: Arc::clone(&self.tables),
            fields: PhantomData,
        }
    }
}

/// In-memory [`RecordRepository`] for one collection.
#[derive(Debug)]
pub struct MemoryRecordRepository<F> {
    tables: Arc<Mutex<RecordTables>>,
    fields: PhantomData<fn() -> F>,
}

impl<F> Clone for MemoryRecordRepository<F> {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            fields: PhantomData,
        }
    }
}

impl<F: MemoryCollection> MemoryRecordRepository<F> {
    fn lock(&self) -> Result<MutexGuard<'_, RecordTables>, RecordRepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RecordRepositoryError::connection(POISONED))
    }
}

fn check_unique<F: MemoryCollection>(
    rows: &[TenantRecord<F>],
    record: &TenantRecord<F>,
) -> Result<(), RecordRepositoryError> {
    let Some((field, value)) = record.fields().unique_key() else {
        return Ok(());
    };
    let taken = rows.iter().any(|row| {
        row.organization_id() == record.organization_id()
            && row.id() != record.id()
            && row.fields().unique_key().is_some_and(|(_, other)| other == value)
    });
    if taken {
        Err(RecordRepositoryError::duplicate(field))
    } else {
        Ok(())
    }
}

#[async_trait]
impl<F: MemoryCollection> RecordRepository<F> for MemoryRecordRepository<F> {
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<TenantRecord<F>>, RecordRepositoryError> {
        let tables = self.lock()?;
        let mut records: Vec<TenantRecord<F>> = F::rows(&tables)
            .iter()
            .filter(|row| row.organization_id() == organization_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });
        Ok(records)
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
    ) -> Result<Option<TenantRecord<F>>, RecordRepositoryError> {
        let tables = self.lock()?;
        Ok(F::rows(&tables)
            .iter()
            .find(|row| row.organization_id() == organization_id && row.id() == id)
            .cloned())
    }

    async fn insert(&self, record: &TenantRecord<F>) -> Result<(), RecordRepositoryError> {
        let mut tables = self.lock()?;
        tables.check_references(record)?;
        check_unique(F::rows(&tables), record)?;
        F::rows_mut(&mut tables).push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &TenantRecord<F>) -> Result<bool, RecordRepositoryError> {
        let mut tables = self.lock()?;
        let Some(index) = F::rows(&tables).iter().position(|row| {
            row.organization_id() == record.organization_id() && row.id() == record.id()
        }) else {
            return Ok(false);
        };
        tables.check_references(record)?;
        check_unique(F::rows(&tables), record)?;
        F::rows_mut(&mut tables)[index] = record.clone();
        Ok(true)
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &RecordId,
    ) -> Result<bool, RecordRepositoryError> {
        let mut tables = self.lock()?;
        let Some(index) = F::rows(&tables)
            .iter()
            .position(|row| row.organization_id() == organization_id && row.id() == id)
        else {
            return Ok(false);
        };
        if let Some(dependent) = tables.dependent(organization_id, F::KIND, id) {
            return Err(RecordRepositoryError::in_use(format!(
                "referenced by {dependent}"
            )));
        }
        F::rows_mut(&mut tables).remove(index);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use crate::domain::{InvoiceStatus, PickupFrequency, ScheduleStatus, VendorStatus};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 15, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn vendor(org: OrganizationId, now: DateTime<Utc>) -> Vendor {
        TenantRecord::create(
            org,
            VendorFields {
                name: "Green Haul".to_owned(),
                contact_email: None,
                contact_phone: None,
                services: Vec::new(),
                status: VendorStatus::Active,
            },
            now,
        )
    }

    fn invoice(org: OrganizationId, vendor_id: RecordId, number: &str, now: DateTime<Utc>) -> Invoice {
        TenantRecord::create(
            org,
            InvoiceFields {
                vendor_id,
                invoice_number: number.to_owned(),
                amount: 120.0,
                currency: "EUR".to_owned(),
                issued_at: now,
                due_at: now + Duration::days(30),
                status: InvoiceStatus::Pending,
            },
            now,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn lists_newest_first_within_the_tenant(now: DateTime<Utc>) {
        let store = MemoryRecordStore::new();
        let vendors = store.repository::<VendorFields>();
        let org = OrganizationId::random();
        let older = vendor(org, now);
        let newer = vendor(org, now + Duration::minutes(5));
        let foreign = vendor(OrganizationId::random(), now);
        for record in [&older, &newer, &foreign] {
            vendors.insert(record).await.expect("insert vendor");
        }

        let listed = vendors.list(&org).await.expect("list vendors");

        let ids: Vec<RecordId> = listed.iter().map(|record| *record.id()).collect();
        assert_eq!(ids, vec![*newer.id(), *older.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn references_must_exist_in_the_same_tenant(now: DateTime<Utc>) {
        let store = MemoryRecordStore::new();
        let vendors = store.repository::<VendorFields>();
        let invoices = store.repository::<InvoiceFields>();
        let other_org_vendor = vendor(OrganizationId::random(), now);
        vendors.insert(&other_org_vendor).await.expect("insert vendor");

        let error = invoices
            .insert(&invoice(OrganizationId::random(), *other_org_vendor.id(), "INV-1", now))
            .await
            .expect_err("foreign vendor rejected");

        assert_eq!(error, RecordRepositoryError::unknown_reference("vendorId"));
    }

    #[rstest]
    #[tokio::test]
    async fn invoice_numbers_are_unique_per_tenant(now: DateTime<Utc>) {
        let store = MemoryRecordStore::new();
        let vendors = store.repository::<VendorFields>();
        let invoices = store.repository::<InvoiceFields>();
        let org = OrganizationId::random();
        let haulier = vendor(org, now);
        vendors.insert(&haulier).await.expect("insert vendor");
        invoices
            .insert(&invoice(org, *haulier.id(), "INV-1", now))
            .await
            .expect("first invoice");

        let error = invoices
            .insert(&invoice(org, *haulier.id(), "INV-1", now))
            .await
            .expect_err("duplicate number");

        assert_eq!(error, RecordRepositoryError::duplicate("invoiceNumber"));
    }

    #[rstest]
    #[tokio::test]
    async fn referenced_records_cannot_be_deleted(now: DateTime<Utc>) {
        let store = MemoryRecordStore::new();
        let org = OrganizationId::random();
        let points = store.repository::<WastePointFields>();
        let schedules = store.repository::<ScheduleFields>();
        let point = TenantRecord::create(
            org,
            WastePointFields {
                name: "Dock 4".to_owned(),
                location: "North yard".to_owned(),
                waste_type: crate::domain::WasteType::Recyclable,
                estimated_volume: 2.5,
                volume_unit: "m3".to_owned(),
                vendor_id: None,
                sensor_id: None,
                active: true,
            },
            now,
        );
        points.insert(&point).await.expect("insert point");
        let pickup = TenantRecord::create(
            org,
            ScheduleFields {
                waste_point_id: *point.id(),
                vendor_id: None,
                frequency: PickupFrequency::Weekly,
                next_pickup_at: now,
                status: ScheduleStatus::Scheduled,
                notes: None,
            },
            now,
        );
        schedules.insert(&pickup).await.expect("insert schedule");

        let error = points
            .delete(&org, point.id())
            .await
            .expect_err("point in use");
        assert_eq!(error, RecordRepositoryError::in_use("referenced by schedules"));

        assert!(schedules.delete(&org, pickup.id()).await.expect("delete schedule"));
        assert!(points.delete(&org, point.id()).await.expect("delete point"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_records(now: DateTime<Utc>) {
        let vendors = MemoryRecordStore::new().repository::<VendorFields>();
        let record = vendor(OrganizationId::random(), now);

        assert!(!vendors.update(&record).await.expect("update runs"));
        assert!(
            !vendors
                .delete(record.organization_id(), record.id())
                .await
                .expect("delete runs")
        );
    }
}
