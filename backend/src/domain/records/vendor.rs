//! Hauliers and processors.

use serde::{Deserialize, Serialize};

use super::validation::{TEXT_MAX, optional_text, required_text};
use super::{
    RecordFields, RecordKind, RecordReference, RecordValidationError, TenantRecord, text_enum,
};

text_enum! {
    /// Whether a vendor is currently engaged.
    #[derive(Default)]
    pub enum VendorStatus as "vendor status" {
        /// Engaged.
        #[default]
        Active => "active",
        /// Not engaged.
        Inactive => "inactive",
    }
}

/// Client fields of a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorFields {
    /// Trading name.
    pub name: String,
    /// Contact mailbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Contact telephone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// Offered services, trimmed and without duplicates.
    #[serde(default)]
    pub services: Vec<String>,
    /// Engagement status. Defaults to `active`.
    #[serde(default)]
    pub status: VendorStatus,
}

fn check_email(email: Option<String>) -> Result<Option<String>, RecordValidationError> {
    let Some(email) = optional_text("contactEmail", email, TEXT_MAX)? else {
        return Ok(None);
    };
    let mut parts = email.split('@');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if well_formed {
        Ok(Some(email))
    } else {
        Err(RecordValidationError::new(
            "contactEmail",
            "invalid_email",
            "contactEmail must contain one '@' with text on both sides",
        ))
    }
}

fn tidy_services(services: Vec<String>) -> Result<Vec<String>, RecordValidationError> {
    let mut tidy: Vec<String> = Vec::with_capacity(services.len());
    for service in services {
        if let Some(service) = optional_text("services", Some(service), TEXT_MAX)? {
            if !tidy.contains(&service) {
                tidy.push(service);
            }
        }
    }
    Ok(tidy)
}

impl RecordFields for VendorFields {
    const KIND: RecordKind = RecordKind::Vendor;

    fn normalise(self) -> Result<Self, RecordValidationError> {
        Ok(Self {
            name: required_text("name", self.name, TEXT_MAX)?,
            contact_email: check_email(self.contact_email)?,
            contact_phone: optional_text("contactPhone", self.contact_phone, 40)?,
            services: tidy_services(self.services)?,
            status: self.status,
        })
    }

    fn references(&self) -> Vec<RecordReference> {
        Vec::new()
    }
}

/// A stored vendor.
pub type Vendor = TenantRecord<VendorFields>;
