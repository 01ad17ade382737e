//! Internal Diesel rows for the tenant record tables.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    CertificationFields, InvoiceFields, OrganizationId, RecordFields, RecordId, ScheduleFields,
    TenantRecord, VendorFields, WastePointFields,
};

use super::schema::{certifications, invoices, schedules, vendors, waste_points};

/// Two-way mapping between a table row and a domain record.
pub(crate) trait RecordRow: Sized {
    /// Fields stored in the row.
    type Fields: RecordFields;

    /// Build the row written for `record`.
    fn from_record(record: &TenantRecord<Self::Fields>) -> Self;

    /// Rebuild the record, failing on text columns outside their vocabulary.
    fn into_record(self) -> Result<TenantRecord<Self::Fields>, String>;
}

fn parse<T>(value: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| err.to_string())
}

fn envelope<F: RecordFields>(
    id: Uuid,
    organization_id: Uuid,
    fields: F,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> TenantRecord<F> {
    TenantRecord::from_parts(
        RecordId::from_uuid(id),
        OrganizationId::from_uuid(organization_id),
        fields,
        created_at,
        updated_at,
    )
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct VendorRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub services: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow for VendorRow {
    type Fields = VendorFields;

    fn from_record(record: &TenantRecord<VendorFields>) -> Self {
        let fields = record.fields();
        Self {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            name: fields.name.clone(),
            contact_email: fields.contact_email.clone(),
            contact_phone: fields.contact_phone.clone(),
            services: fields.services.clone(),
            status: fields.status.as_str().to_owned(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<TenantRecord<VendorFields>, String> {
        let fields = VendorFields {
            name: self.name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            services: self.services,
            status: parse(&self.status)?,
        };
        Ok(envelope(
            self.id,
            self.organization_id,
            fields,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = waste_points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct WastePointRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub location: String,
    pub waste_type: String,
    pub estimated_volume: f64,
    pub volume_unit: String,
    pub vendor_id: Option<Uuid>,
    pub sensor_id: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow for WastePointRow {
    type Fields = WastePointFields;

    fn from_record(record: &TenantRecord<WastePointFields>) -> Self {
        let fields = record.fields();
        Self {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            name: fields.name.clone(),
            location: fields.location.clone(),
            waste_type: fields.waste_type.as_str().to_owned(),
            estimated_volume: fields.estimated_volume,
            volume_unit: fields.volume_unit.clone(),
            vendor_id: fields.vendor_id.map(|id| *id.as_uuid()),
            sensor_id: fields.sensor_id.clone(),
            active: fields.active,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<TenantRecord<WastePointFields>, String> {
        let fields = WastePointFields {
            name: self.name,
            location: self.location,
            waste_type: parse(&self.waste_type)?,
            estimated_volume: self.estimated_volume,
            volume_unit: self.volume_unit,
            vendor_id: self.vendor_id.map(RecordId::from_uuid),
            sensor_id: self.sensor_id,
            active: self.active,
        };
        Ok(envelope(
            self.id,
            self.organization_id,
            fields,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ScheduleRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub waste_point_id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub frequency: String,
    pub next_pickup_at: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow for ScheduleRow {
    type Fields = ScheduleFields;

    fn from_record(record: &TenantRecord<ScheduleFields>) -> Self {
        let fields = record.fields();
        Self {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            waste_point_id: *fields.waste_point_id.as_uuid(),
            vendor_id: fields.vendor_id.map(|id| *id.as_uuid()),
            frequency: fields.frequency.as_str().to_owned(),
            next_pickup_at: fields.next_pickup_at,
            status: fields.status.as_str().to_owned(),
            notes: fields.notes.clone(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<TenantRecord<ScheduleFields>, String> {
        let fields = ScheduleFields {
            waste_point_id: RecordId::from_uuid(self.waste_point_id),
            vendor_id: self.vendor_id.map(RecordId::from_uuid),
            frequency: parse(&self.frequency)?,
            next_pickup_at: self.next_pickup_at,
            status: parse(&self.status)?,
            notes: self.notes,
        };
        Ok(envelope(
            self.id,
            self.organization_id,
            fields,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InvoiceRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub vendor_id: Uuid,
    pub invoice_number: String,
    pub amount: f64,
    pub currency: String,
    pub issued_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow for InvoiceRow {
    type Fields = InvoiceFields;

    fn from_record(record: &TenantRecord<InvoiceFields>) -> Self {
        let fields = record.fields();
        Self {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            vendor_id: *fields.vendor_id.as_uuid(),
            invoice_number: fields.invoice_number.clone(),
            amount: fields.amount,
            currency: fields.currency.clone(),
            issued_at: fields.issued_at,
            due_at: fields.due_at,
            status: fields.status.as_str().to_owned(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<TenantRecord<InvoiceFields>, String> {
        let fields = InvoiceFields {
            vendor_id: RecordId::from_uuid(self.vendor_id),
            invoice_number: self.invoice_number,
            amount: self.amount,
            currency: self.currency,
            issued_at: self.issued_at,
            due_at: self.due_at,
            status: parse(&self.status)?,
        };
        Ok(envelope(
            self.id,
            self.organization_id,
            fields,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = certifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CertificationRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub issuer: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow for CertificationRow {
    type Fields = CertificationFields;

    fn from_record(record: &TenantRecord<CertificationFields>) -> Self {
        let fields = record.fields();
        Self {
            id: *record.id().as_uuid(),
            organization_id: *record.organization_id().as_uuid(),
            name: fields.name.clone(),
            issuer: fields.issuer.clone(),
            issued_at: fields.issued_at,
            expires_at: fields.expires_at,
            status: fields.status.as_str().to_owned(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<TenantRecord<CertificationFields>, String> {
        let fields = CertificationFields {
            name: self.name,
            issuer: self.issuer,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
            status: parse(&self.status)?,
        };
        Ok(envelope(
            self.id,
            self.organization_id,
            fields,
            self.created_at,
            self.updated_at,
        ))
    }
}
