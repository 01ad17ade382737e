//! Planned pickups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{NOTES_MAX, optional_text};
use super::{
    RecordFields, RecordId, RecordKind, RecordReference, RecordValidationError, TenantRecord,
    text_enum,
};

text_enum! {
    /// How often a pickup recurs.
    pub enum PickupFrequency as "pickup frequency" {
        /// Every day.
        Daily => "daily",
        /// Every week.
        Weekly => "weekly",
        /// Every other week.
        Biweekly => "biweekly",
        /// Every month.
        Monthly => "monthly",
        /// Only when requested.
        OnDemand => "on_demand",
    }
}

text_enum! {
    /// Progress of the next pickup. Set directly by clients.
    #[derive(Default)]
    pub enum ScheduleStatus as "schedule status" {
        /// Planned.
        #[default]
        Scheduled => "scheduled",
        /// Carried out.
        Completed => "completed",
        /// Called off.
        Cancelled => "cancelled",
    }
}

/// Client fields of a pickup schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFields {
    /// Waste point to collect from.
    pub waste_point_id: RecordId,
    /// Vendor performing the pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<RecordId>,
    /// Recurrence.
    pub frequency: PickupFrequency,
    /// Next planned pickup.
    pub next_pickup_at: DateTime<Utc>,
    /// Progress. Defaults to `scheduled`.
    #[serde(default)]
    pub status: ScheduleStatus,
    /// Free-text notes for the crew.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecordFields for ScheduleFields {
    const KIND: RecordKind = RecordKind::Schedule;

    fn normalise(self) -> Result<Self, RecordValidationError> {
        Ok(Self {
            notes: optional_text("notes", self.notes, NOTES_MAX)?,
            ..self
        })
    }

    fn references(&self) -> Vec<RecordReference> {
        let mut references = vec![RecordReference {
            field: "wastePointId",
            kind: RecordKind::WastePoint,
            id: self.waste_point_id,
        }];
        if let Some(id) = self.vendor_id {
            references.push(RecordReference {
                field: "vendorId",
                kind: RecordKind::Vendor,
                id,
            });
        }
        references
    }
}

/// A stored schedule.
pub type Schedule = TenantRecord<ScheduleFields>;
