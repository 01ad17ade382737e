//! Compliance certificates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{TEXT_MAX, not_before, required_text};
use super::{
    RecordFields, RecordKind, RecordReference, RecordValidationError, TenantRecord, text_enum,
};

text_enum! {
    /// Certificate standing. Set directly by clients.
    #[derive(Default)]
    pub enum CertificationStatus as "certification status" {
        /// In force.
        #[default]
        Active => "active",
        /// Lapsed.
        Expired => "expired",
        /// Applied for.
        Pending => "pending",
    }
}

/// Client fields of a certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationFields {
    /// Scheme name, e.g. `ISO 14001`.
    pub name: String,
    /// Certifying body.
    pub issuer: String,
    /// Award date.
    pub issued_at: DateTime<Utc>,
    /// Expiry date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Standing. Defaults to `active`.
    #[serde(default)]
    pub status: CertificationStatus,
}

impl RecordFields for CertificationFields {
    const KIND: RecordKind = RecordKind::Certification;

    fn normalise(self) -> Result<Self, RecordValidationError> {
        let expires_at = self
            .expires_at
            .map(|expires| not_before("expiresAt", expires, "issuedAt", self.issued_at))
            .transpose()?;
        Ok(Self {
            name: required_text("name", self.name, TEXT_MAX)?,
            issuer: required_text("issuer", self.issuer, TEXT_MAX)?,
            issued_at: self.issued_at,
            expires_at,
            status: self.status,
        })
    }

    fn references(&self) -> Vec<RecordReference> {
        Vec::new()
    }
}

/// A stored certification.
pub type Certification = TenantRecord<CertificationFields>;
