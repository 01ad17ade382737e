//! PostgreSQL-backed [`RecordRepository`] implementations, one per table.
//!
//! The five record tables share a shape: tenant column, timestamps and
//! composite foreign keys onto `(organization_id, id)`. A macro generates the
//! adapters; constraint names map violations back to request fields.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{
    CertificationFields, InvoiceFields, OrganizationId, RecordId, ScheduleFields, TenantRecord,
    VendorFields, WastePointFields,
};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::pool::{DbPool, PoolError};
use super::record_rows::{
    CertificationRow, InvoiceRow, RecordRow, ScheduleRow, VendorRow, WastePointRow,
};
use super::schema::{certifications, invoices, schedules, vendors, waste_points};

/// Constraint name to request field.
type ConstraintFields = &'static [(&'static str, &'static str)];

const DEPENDENT_TABLES: &[&str] = &["waste_points", "schedules", "invoices"];

fn map_pool_error(error: PoolError) -> RecordRepositoryError {
    RecordRepositoryError::connection(pool_message(error))
}

fn field_for(constraints: ConstraintFields, constraint: Option<&str>) -> Option<&'static str> {
    let constraint = constraint?;
    constraints
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, field)| *field)
}

fn map_write_error(
    error: diesel::result::Error,
    constraints: ConstraintFields,
) -> RecordRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => RecordRepositoryError::connection(message),
        DieselFailure::ForeignKey { constraint } => {
            match field_for(constraints, constraint.as_deref()) {
                Some(field) => RecordRepositoryError::unknown_reference(field),
                None => RecordRepositoryError::query("foreign key violation"),
            }
        }
        DieselFailure::Unique { constraint } => {
            match field_for(constraints, constraint.as_deref()) {
                Some(field) => RecordRepositoryError::duplicate(field),
                None => RecordRepositoryError::query("unique violation"),
            }
        }
        DieselFailure::Query(message) => RecordRepositoryError::query(message),
    }
}

fn map_delete_error(error: diesel::result::Error) -> RecordRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => RecordRepositoryError::connection(message),
        DieselFailure::ForeignKey { constraint } => {
            let dependent = constraint.as_deref().and_then(|name| {
                DEPENDENT_TABLES
                    .iter()
                    .find(|table| name.starts_with(**table))
            });
            RecordRepositoryError::in_use(match dependent {
                Some(table) => format!("referenced by {}", table.replace('_', " ")),
                None => "referenced by other records".to_owned(),
            })
        }
        DieselFailure::Unique { .. } => RecordRepositoryError::query("unique violation"),
        DieselFailure::Query(message) => RecordRepositoryError::query(message),
    }
}

fn into_records<R: RecordRow>(
    rows: Vec<R>,
) -> Result<Vec<TenantRecord<R::Fields>>, RecordRepositoryError> {
    rows.into_iter()
        .map(|row| row.into_record().map_err(RecordRepositoryError::query))
        .collect()
}

macro_rules! diesel_record_repository {
    (
        $(#[$meta:meta])*
        $name:ident {
            row: $row:ty,
            fields: $fields:ty,
            table: $table:ident,
            constraints: $constraints:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: DbPool,
        }

        impl $name {
            /// Create a repository over `pool`.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl RecordRepository<$fields> for $name {
            async fn list(
                &self,
                organization_id: &OrganizationId,
            ) -> Result<Vec<TenantRecord<$fields>>, RecordRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .filter($table::organization_id.eq(organization_id.as_uuid()))
                    .order(($table::created_at.desc(), $table::id.desc()))
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(|err| map_write_error(err, $constraints))?;
                into_records(rows)
            }

            async fn find(
                &self,
                organization_id: &OrganizationId,
                id: &RecordId,
            ) -> Result<Option<TenantRecord<$fields>>, RecordRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .filter($table::organization_id.eq(organization_id.as_uuid()))
                    .filter($table::id.eq(id.as_uuid()))
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(|err| map_write_error(err, $constraints))?;
                row.map(|row| row.into_record().map_err(RecordRepositoryError::query))
                    .transpose()
            }

            async fn insert(
                &self,
                record: &TenantRecord<$fields>,
            ) -> Result<(), RecordRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                diesel::insert_into($table::table)
                    .values(<$row>::from_record(record))
                    .execute(&mut conn)
                    .await
                    .map(|_| ())
                    .map_err(|err| map_write_error(err, $constraints))
            }

            async fn update(
                &self,
                record: &TenantRecord<$fields>,
            ) -> Result<bool, RecordRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let changed = diesel::update(
                    $table::table
                        .filter($table::organization_id.eq(record.organization_id().as_uuid()))
                        .filter($table::id.eq(record.id().as_uuid())),
                )
                .set(&<$row>::from_record(record))
                .execute(&mut conn)
                .await
                .map_err(|err| map_write_error(err, $constraints))?;
                Ok(changed > 0)
            }

            async fn delete(
                &self,
                organization_id: &OrganizationId,
                id: &RecordId,
            ) -> Result<bool, RecordRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let removed = diesel::delete(
                    $table::table
                        .filter($table::organization_id.eq(organization_id.as_uuid()))
                        .filter($table::id.eq(id.as_uuid())),
                )
                .execute(&mut conn)
                .await
                .map_err(map_delete_error)?;
                Ok(removed > 0)
            }
        }
    };
}

diesel_record_repository! {
    /// Diesel adapter for `waste_points`.
    DieselWastePointRepository {
        row: WastePointRow,
        fields: WastePointFields,
        table: waste_points,
        constraints: &[("waste_points_vendor_fkey", "vendorId")],
    }
}

diesel_record_repository! {
    /// Diesel adapter for `vendors`.
    DieselVendorRepository {
        row: VendorRow,
        fields: VendorFields,
        table: vendors,
        constraints: &[],
    }
}

diesel_record_repository! {
    /// Diesel adapter for `schedules`.
    DieselScheduleRepository {
        row: ScheduleRow,
        fields: ScheduleFields,
        table: schedules,
        constraints: &[
            ("schedules_waste_point_fkey", "wastePointId"),
            ("schedules_vendor_fkey", "vendorId"),
        ],
    }
}

diesel_record_repository! {
    /// Diesel adapter for `invoices`.
    DieselInvoiceRepository {
        row: InvoiceRow,
        fields: InvoiceFields,
        table: invoices,
        constraints: &[
            ("invoices_vendor_fkey", "vendorId"),
            ("invoices_number_key", "invoiceNumber"),
        ],
    }
}

diesel_record_repository! {
    /// Diesel adapter for `certifications`.
    DieselCertificationRepository {
        row: CertificationRow,
        fields: CertificationFields,
        table: certifications,
        constraints: &[],
    }
}
