//! Waste collection points.

use serde::{Deserialize, Serialize};

use super::validation::{TEXT_MAX, non_negative, optional_text, required_text};
use super::{
    RecordFields, RecordId, RecordKind, RecordReference, RecordValidationError, TenantRecord,
    text_enum,
};

text_enum! {
    /// Dominant stream collected at a waste point.
    pub enum WasteType as "waste type" {
        /// Mixed residual waste.
        General => "general",
        /// Dry recyclables.
        Recyclable => "recyclable",
        /// Food and garden waste.
        Organic => "organic",
        /// Hazardous materials.
        Hazardous => "hazardous",
        /// Waste electrical and electronic equipment.
        Electronic => "electronic",
        /// Construction and demolition waste.
        Construction => "construction",
    }
}

fn default_volume_unit() -> String {
    "m3".to_owned()
}

const fn default_active() -> bool {
    true
}

/// Client fields of a waste point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WastePointFields {
    /// Display name.
    pub name: String,
    /// Free-text address or site reference.
    pub location: String,
    /// Dominant stream.
    pub waste_type: WasteType,
    /// Expected volume per collection.
    pub estimated_volume: f64,
    /// Unit of `estimated_volume`. Defaults to `m3`.
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    /// Vendor servicing this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<RecordId>,
    /// Fill-level sensor identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
    /// Whether the point is in service. Defaults to `true`.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl RecordFields for WastePointFields {
    const KIND: RecordKind = RecordKind::WastePoint;

    fn normalise(self) -> Result<Self, RecordValidationError> {
        Ok(Self {
            name: required_text("name", self.name, TEXT_MAX)?,
            location: required_text("location", self.location, TEXT_MAX)?,
            waste_type: self.waste_type,
            estimated_volume: non_negative("estimatedVolume", self.estimated_volume)?,
            volume_unit: required_text("volumeUnit", self.volume_unit, 16)?,
            vendor_id: self.vendor_id,
            sensor_id: optional_text("sensorId", self.sensor_id, TEXT_MAX)?,
            active: self.active,
        })
    }

    fn references(&self) -> Vec<RecordReference> {
        self.vendor_id
            .map(|id| RecordReference {
                field: "vendorId",
                kind: RecordKind::Vendor,
                id,
            })
            .into_iter()
            .collect()
    }
}

/// A stored waste point.
pub type WastePoint = TenantRecord<WastePointFields>;
