//! Vendor invoices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{non_negative, not_before, required_text};
use super::{
    RecordFields, RecordId, RecordKind, RecordReference, RecordValidationError, TenantRecord,
    text_enum,
};

text_enum! {
    /// Payment state. Set directly by clients.
    #[derive(Default)]
    pub enum InvoiceStatus as "invoice status" {
        /// Awaiting payment.
        #[default]
        Pending => "pending",
        /// Settled.
        Paid => "paid",
        /// Past due date.
        Overdue => "overdue",
        /// Voided.
        Cancelled => "cancelled",
    }
}

/// Client fields of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFields {
    /// Issuing vendor.
    pub vendor_id: RecordId,
    /// Vendor's invoice number, unique within the organization.
    pub invoice_number: String,
    /// Gross amount.
    pub amount: f64,
    /// ISO 4217 code, e.g. `EUR`.
    pub currency: String,
    /// Issue date.
    pub issued_at: DateTime<Utc>,
    /// Payment due date.
    pub due_at: DateTime<Utc>,
    /// Payment state. Defaults to `pending`.
    #[serde(default)]
    pub status: InvoiceStatus,
}

fn check_currency(currency: String) -> Result<String, RecordValidationError> {
    let trimmed = currency.trim();
    if trimmed.len() == 3 && trimmed.bytes().all(|byte| byte.is_ascii_uppercase()) {
        Ok(trimmed.to_owned())
    } else {
        Err(RecordValidationError::new(
            "currency",
            "invalid_currency",
            "currency must be three uppercase ASCII letters",
        ))
    }
}

impl RecordFields for InvoiceFields {
    const KIND: RecordKind = RecordKind::Invoice;

    fn normalise(self) -> Result<Self, RecordValidationError> {
        Ok(Self {
            vendor_id: self.vendor_id,
            invoice_number: required_text("invoiceNumber", self.invoice_number, 64)?,
            amount: non_negative("amount", self.amount)?,
            currency: check_currency(self.currency)?,
            issued_at: self.issued_at,
            due_at: not_before("dueAt", self.due_at, "issuedAt", self.issued_at)?,
            status: self.status,
        })
    }

    fn references(&self) -> Vec<RecordReference> {
        vec![RecordReference {
            field: "vendorId",
            kind: RecordKind::Vendor,
            id: self.vendor_id,
        }]
    }
}

/// A stored invoice.
pub type Invoice = TenantRecord<InvoiceFields>;
