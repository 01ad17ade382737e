//! Tests for record field validation and the shared record envelope.

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn waste_point() -> WastePointFields {
    serde_json::from_value(json!({
        "name": "  Loading bay  ",
        "location": "Unit 4, Dock Road",
        "wasteType": "recyclable",
        "estimatedVolume": 2.5
    }))
    .expect("valid waste point payload")
}

fn invoice(now: DateTime<Utc>) -> InvoiceFields {
    InvoiceFields {
        vendor_id: RecordId::random(),
        invoice_number: "INV-001".to_owned(),
        amount: 120.0,
        currency: "EUR".to_owned(),
        issued_at: now,
        due_at: now + Duration::days(30),
        status: InvoiceStatus::default(),
    }
}

#[rstest]
fn waste_point_defaults_and_trims() {
    let fields = waste_point().normalise().expect("valid fields");
    assert_eq!(fields.name, "Loading bay");
    assert_eq!(fields.volume_unit, "m3");
    assert!(fields.active);
    assert!(fields.references().is_empty());
}

#[rstest]
#[case(-0.5)]
#[case(f64::INFINITY)]
fn waste_point_rejects_bad_volume(#[case] volume: f64) {
    let fields = WastePointFields {
        estimated_volume: volume,
        ..waste_point()
    };
    let error = fields.normalise().expect_err("volume rejected");
    assert_eq!(error.field(), "estimatedVolume");
    assert_eq!(error.code(), "out_of_range");
}

#[rstest]
fn waste_point_blank_sensor_becomes_none() {
    let fields = WastePointFields {
        sensor_id: Some("   ".to_owned()),
        ..waste_point()
    };
    assert_eq!(fields.normalise().expect("valid").sensor_id, None);
}

#[rstest]
fn waste_point_references_vendor() {
    let vendor = RecordId::random();
    let fields = WastePointFields {
        vendor_id: Some(vendor),
        ..waste_point()
    };
    assert_eq!(
        fields.references(),
        vec![RecordReference {
            field: "vendorId",
            kind: RecordKind::Vendor,
            id: vendor,
        }]
    );
}

#[rstest]
#[case("ops@hauler.example", true)]
#[case("ops@", false)]
#[case("@hauler.example", false)]
#[case("a@b@c", false)]
#[case("no-at-sign", false)]
fn vendor_email_shape(#[case] email: &str, #[case] valid: bool) {
    let fields = VendorFields {
        name: "Hauler".to_owned(),
        contact_email: Some(email.to_owned()),
        contact_phone: None,
        services: Vec::new(),
        status: VendorStatus::Active,
    };
    let result = fields.normalise();
    assert_eq!(result.is_ok(), valid);
    if let Err(error) = result {
        assert_eq!(error.code(), "invalid_email");
    }
}

#[rstest]
fn vendor_services_are_tidied() {
    let fields: VendorFields = serde_json::from_value(json!({
        "name": "Hauler",
        "services": [" skip hire ", "", "skip hire", "baling"]
    }))
    .expect("valid vendor payload");
    let fields = fields.normalise().expect("valid fields");
    assert_eq!(fields.services, vec!["skip hire", "baling"]);
    assert_eq!(fields.status, VendorStatus::Active);
}

#[rstest]
fn schedule_references_point_and_vendor(now: DateTime<Utc>) {
    let point = RecordId::random();
    let vendor = RecordId::random();
    let fields = ScheduleFields {
        waste_point_id: point,
        vendor_id: Some(vendor),
        frequency: PickupFrequency::OnDemand,
        next_pickup_at: now,
        status: ScheduleStatus::default(),
        notes: Some(" gate code 1234 ".to_owned()),
    };
    let fields = fields.normalise().expect("valid fields");
    assert_eq!(fields.notes.as_deref(), Some("gate code 1234"));
    let kinds: Vec<RecordKind> = fields.references().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![RecordKind::WastePoint, RecordKind::Vendor]);
}

#[rstest]
#[case("eur")]
#[case("EU")]
#[case("EURO")]
#[case("E1R")]
fn invoice_rejects_bad_currency(now: DateTime<Utc>, #[case] currency: &str) {
    let fields = InvoiceFields {
        currency: currency.to_owned(),
        ..invoice(now)
    };
    assert_eq!(
        fields.normalise().expect_err("currency rejected").code(),
        "invalid_currency"
    );
}

#[rstest]
fn invoice_due_before_issue_is_rejected(now: DateTime<Utc>) {
    let fields = InvoiceFields {
        due_at: now - Duration::days(1),
        ..invoice(now)
    };
    let error = fields.normalise().expect_err("due date rejected");
    assert_eq!(error.field(), "dueAt");
    assert_eq!(error.code(), "before_start");
}

#[rstest]
fn invoice_due_on_issue_day_is_accepted(now: DateTime<Utc>) {
    let fields = InvoiceFields {
        due_at: now,
        ..invoice(now)
    };
    assert!(fields.normalise().is_ok());
}

#[rstest]
fn certification_expiry_must_follow_issue(now: DateTime<Utc>) {
    let fields = CertificationFields {
        name: "ISO 14001".to_owned(),
        issuer: "Certifier Ltd".to_owned(),
        issued_at: now,
        expires_at: Some(now - Duration::days(1)),
        status: CertificationStatus::Active,
    };
    assert_eq!(
        fields.normalise().expect_err("expiry rejected").field(),
        "expiresAt"
    );
}

#[rstest]
fn record_envelope_flattens_fields(now: DateTime<Utc>) {
    let organization = OrganizationId::random();
    let record = WastePoint::create(organization, waste_point().normalise().expect("valid"), now);

    let value = serde_json::to_value(&record).expect("serialise record");

    assert_eq!(value["organizationId"], json!(organization.to_string()));
    assert_eq!(value["wasteType"], json!("recyclable"));
    assert_eq!(value["name"], json!("Loading bay"));
    assert!(value.get("fields").is_none());
    assert!(value.get("vendorId").is_none());
    assert_eq!(record.kind(), RecordKind::WastePoint);
}

#[rstest]
fn replace_keeps_identity(now: DateTime<Utc>) {
    let record = Invoice::create(OrganizationId::random(), invoice(now), now);
    let later = now + Duration::minutes(5);
    let revised_fields = InvoiceFields {
        status: InvoiceStatus::Paid,
        ..invoice(now)
    };

    let revised = record.clone().replace(revised_fields, later);

    assert_eq!(revised.id(), record.id());
    assert_eq!(revised.created_at(), now);
    assert_eq!(revised.updated_at(), later);
    assert_eq!(revised.fields().status, InvoiceStatus::Paid);
}

#[rstest]
fn unknown_enum_values_fail_to_deserialise() {
    let result = serde_json::from_value::<WastePointFields>(json!({
        "name": "Bay",
        "location": "Dock",
        "wasteType": "radioactive",
        "estimatedVolume": 1.0
    }));
    assert!(result.is_err());
}

#[rstest]
fn record_ids_display_as_hyphenated_uuids() {
    let uuid = uuid::Uuid::new_v4();
    let id = RecordId::from_uuid(uuid);

    assert_eq!(id.to_string(), uuid.hyphenated().to_string());
    assert_eq!(format!("/vendors/{id}"), format!("/vendors/{uuid}"));
}
