//! Internal Diesel row structs for analytics configurations and metrics.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-validate text columns and report corrupt rows as a message.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    AnalyticsConfig, AnalyticsConfigId, AnalyticsConfigParts, ConfigName, OrganizationId,
    ReportSchedule, SustainabilityMetric,
};

use super::schema::{analytics_configs, metric_seed_runs, sustainability_metrics};

/// Row of `analytics_configs`, used for reads, inserts and updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = analytics_configs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AnalyticsConfigRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub config_type: String,
    pub name: String,
    pub config: Value,
    pub active: bool,
    pub is_standard: bool,
    pub schedule: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AnalyticsConfig> for AnalyticsConfigRow {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            id: *config.id().as_uuid(),
            organization_id: *config.organization_id().as_uuid(),
            config_type: config.config_type().as_str().to_owned(),
            name: config.name().as_ref().to_owned(),
            config: Value::Object(config.config().clone()),
            active: config.active(),
            is_standard: config.is_standard(),
            schedule: config.schedule().map(|schedule| schedule.as_str().to_owned()),
            created_at: config.created_at(),
            updated_at: config.updated_at(),
        }
    }
}

impl TryFrom<AnalyticsConfigRow> for AnalyticsConfig {
    type Error = String;

    fn try_from(row: AnalyticsConfigRow) -> Result<Self, Self::Error> {
        let Value::Object(config) = row.config else {
            return Err(format!("analytics config {} payload is not an object", row.id));
        };
        Ok(Self::from_parts(AnalyticsConfigParts {
            id: AnalyticsConfigId::from_uuid(row.id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            config_type: row.config_type.parse().map_err(|err| format!("{err}"))?,
            name: ConfigName::new(&row.name).map_err(|err| err.to_string())?,
            config,
            active: row.active,
            is_standard: row.is_standard,
            schedule: row
                .schedule
                .as_deref()
                .map(str::parse::<ReportSchedule>)
                .transpose()
                .map_err(|err| format!("{err}"))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

/// Row of `sustainability_metrics`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sustainability_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MetricRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub metric_type: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

impl From<&SustainabilityMetric> for MetricRow {
    fn from(sample: &SustainabilityMetric) -> Self {
        Self {
            id: *sample.id(),
            organization_id: *sample.organization_id().as_uuid(),
            metric_type: sample.metric_type().as_str().to_owned(),
            value: sample.value(),
            recorded_at: sample.timestamp(),
        }
    }
}

impl TryFrom<MetricRow> for SustainabilityMetric {
    type Error = String;

    fn try_from(row: MetricRow) -> Result<Self, Self::Error> {
        Self::new(
            row.id,
            OrganizationId::from_uuid(row.organization_id),
            row.metric_type.parse().map_err(|err| format!("{err}"))?,
            row.value,
            row.recorded_at,
        )
        .map_err(|err| err.to_string())
    }
}

/// Insertable marker in `metric_seed_runs`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = metric_seed_runs)]
pub(crate) struct NewSeedRunRow {
    pub organization_id: Uuid,
    pub samples: i32,
    pub seeded_at: DateTime<Utc>,
}
