//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Tenants. Every other table references this one.
    organizations (id) {
        id -> Uuid,
        name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Chart, analysis and report builder configurations.
    ///
    /// `(organization_id, config_type, name)` is unique.
    analytics_configs (id) {
        id -> Uuid,
        organization_id -> Uuid,
        config_type -> Text,
        name -> Text,
        config -> Jsonb,
        active -> Bool,
        is_standard -> Bool,
        schedule -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only metric samples.
    sustainability_metrics (id) {
        id -> Uuid,
        organization_id -> Uuid,
        metric_type -> Text,
        value -> Float8,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per organization whose synthetic history has been written.
    metric_seed_runs (organization_id) {
        organization_id -> Uuid,
        samples -> Int4,
        seeded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hauliers and processors.
    vendors (id) {
        id -> Uuid,
        organization_id -> Uuid,
        name -> Text,
        contact_email -> Nullable<Text>,
        contact_phone -> Nullable<Text>,
        services -> Array<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collection points. `vendor_id` references a vendor of the same organization.
    waste_points (id) {
        id -> Uuid,
        organization_id -> Uuid,
        name -> Text,
        location -> Text,
        waste_type -> Text,
        estimated_volume -> Float8,
        volume_unit -> Text,
        vendor_id -> Nullable<Uuid>,
        sensor_id -> Nullable<Text>,
        active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Planned pickups.
    schedules (id) {
        id -> Uuid,
        organization_id -> Uuid,
        waste_point_id -> Uuid,
        vendor_id -> Nullable<Uuid>,
        frequency -> Text,
        next_pickup_at -> Timestamptz,
        status -> Text,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vendor invoices. `(organization_id, invoice_number)` is unique.
    invoices (id) {
        id -> Uuid,
        organization_id -> Uuid,
        vendor_id -> Uuid,
        invoice_number -> Text,
        amount -> Float8,
        currency -> Text,
        issued_at -> Timestamptz,
        due_at -> Timestamptz,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Compliance certificates.
    certifications (id) {
        id -> Uuid,
        organization_id -> Uuid,
        name -> Text,
        issuer -> Text,
        issued_at -> Timestamptz,
        expires_at -> Nullable<Timestamptz>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(analytics_configs -> organizations (organization_id));
diesel::joinable!(sustainability_metrics -> organizations (organization_id));
diesel::joinable!(metric_seed_runs -> organizations (organization_id));
diesel::joinable!(vendors -> organizations (organization_id));
diesel::joinable!(waste_points -> organizations (organization_id));
diesel::joinable!(schedules -> organizations (organization_id));
diesel::joinable!(invoices -> organizations (organization_id));
diesel::joinable!(certifications -> organizations (organization_id));

diesel::allow_tables_to_appear_in_same_query!(
    organizations,
    analytics_configs,
    sustainability_metrics,
    metric_seed_runs,
    vendors,
    waste_points,
    schedules,
    invoices,
    certifications,
);
