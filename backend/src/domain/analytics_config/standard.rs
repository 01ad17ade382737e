//! Standard configurations every organization starts with.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use super::{AnalyticsConfig, AnalyticsConfigId, ConfigName, ConfigType, ReportSchedule};
use crate::domain::{MetricType, OrganizationId, Timeframe};

struct StandardEntry {
    config_type: ConfigType,
    name: &'static str,
    chart_type: Option<&'static str>,
    metric_types: &'static [MetricType],
    timeframe: Timeframe,
    schedule: Option<ReportSchedule>,
}

const STANDARD_ENTRIES: &[StandardEntry] = &[
    StandardEntry {
        config_type: ConfigType::Chart,
        name: "Waste generated over time",
        chart_type: Some("line"),
        metric_types: &[MetricType::WasteGenerated],
        timeframe: Timeframe::Month,
        schedule: None,
    },
    StandardEntry {
        config_type: ConfigType::Chart,
        name: "Diversion vs. generation",
        chart_type: Some("bar"),
        metric_types: &[MetricType::WasteGenerated, MetricType::WasteDiverted],
        timeframe: Timeframe::Month,
        schedule: None,
    },
    StandardEntry {
        config_type: ConfigType::Analysis,
        name: "Circularity overview",
        chart_type: None,
        metric_types: &[MetricType::RecyclingRate, MetricType::WasteDiverted],
        timeframe: Timeframe::Quarter,
        schedule: None,
    },
    StandardEntry {
        config_type: ConfigType::Report,
        name: "Monthly sustainability report",
        chart_type: None,
        metric_types: MetricType::ALL,
        timeframe: Timeframe::Month,
        schedule: Some(ReportSchedule::Monthly),
    },
];

impl StandardEntry {
    fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        if let Some(chart_type) = self.chart_type {
            payload.insert("chartType".to_owned(), json!(chart_type));
        }
        payload.insert(
            "metricTypes".to_owned(),
            Value::Array(
                self.metric_types
                    .iter()
                    .map(|metric| json!(metric.as_str()))
                    .collect(),
            ),
        );
        payload.insert("timeframe".to_owned(), json!(self.timeframe.as_str()));
        payload
    }

    fn build(&self, organization_id: OrganizationId, now: DateTime<Utc>) -> AnalyticsConfig {
        AnalyticsConfig {
            id: AnalyticsConfigId::random(),
            organization_id,
            config_type: self.config_type,
            name: ConfigName(self.name.to_owned()),
            config: self.payload(),
            active: true,
            is_standard: true,
            schedule: self.schedule,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fresh standard configurations for one organization.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use wasteflow::domain::{OrganizationId, standard_configs};
///
/// let configs = standard_configs(OrganizationId::random(), Utc::now());
/// assert_eq!(configs.len(), 4);
/// assert!(configs.iter().all(|config| config.is_standard()));
/// ```
#[must_use]
pub fn standard_configs(
    organization_id: OrganizationId,
    now: DateTime<Utc>,
) -> Vec<AnalyticsConfig> {
    STANDARD_ENTRIES
        .iter()
        .map(|entry| entry.build(organization_id, now))
        .collect()
}
