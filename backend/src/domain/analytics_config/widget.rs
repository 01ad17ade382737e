//! Widget data derived from a stored configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AnalyticsConfig, AnalyticsConfigId, ConfigName, ConfigType};
use crate::domain::{MetricSeries, MetricSnapshot, MetricSummary, MetricType, Timeframe};

const METRIC_TYPES_KEY: &str = "metricTypes";
const TIMEFRAME_KEY: &str = "timeframe";

/// Metric selection read from a configuration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSelection {
    /// Selected types without duplicates, in payload order. Never empty.
    pub metric_types: Vec<MetricType>,
    /// Window to aggregate over.
    pub timeframe: Timeframe,
    /// Payload entries that were not understood.
    pub skipped: Vec<String>,
}

impl WidgetSelection {
    /// Read `metricTypes` and `timeframe` from the payload.
    ///
    /// `requested` overrides the payload timeframe. An empty or absent
    /// selection means every metric type.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use wasteflow::domain::{
    ///     AnalyticsConfig, AnalyticsConfigDraft, ConfigType, MetricType, OrganizationId,
    ///     Timeframe, WidgetSelection,
    /// };
    ///
    /// let draft = AnalyticsConfigDraft::new(
    ///     ConfigType::Chart,
    ///     "Water",
    ///     serde_json::json!({ "metricTypes": ["water_usage", "mystery"], "timeframe": "week" }),
    ///     None,
    ///     None,
    /// ).unwrap();
    /// let config = AnalyticsConfig::from_draft(OrganizationId::random(), draft, Utc::now());
    /// let selection = WidgetSelection::from_config(&config, None);
    /// assert_eq!(selection.metric_types, vec![MetricType::WaterUsage]);
    /// assert_eq!(selection.timeframe, Timeframe::Week);
    /// assert_eq!(selection.skipped, vec!["metricTypes: mystery".to_owned()]);
    /// ```
    #[must_use]
    pub fn from_config(config: &AnalyticsConfig, requested: Option<Timeframe>) -> Self {
        let mut skipped = Vec::new();
        let mut metric_types = Vec::new();

        match config.config().get(METRIC_TYPES_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                for entry in entries {
                    match entry.as_str().map(str::parse::<MetricType>) {
                        Some(Ok(metric)) if !metric_types.contains(&metric) => {
                            metric_types.push(metric);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => {
                            skipped.push(format!("{METRIC_TYPES_KEY}: {}", describe(entry)));
                        }
                    }
                }
            }
            Some(other) => skipped.push(format!("{METRIC_TYPES_KEY}: {other}")),
        }
        if metric_types.is_empty() {
            metric_types = MetricType::ALL.to_vec();
        }

        let stored = match config.config().get(TIMEFRAME_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_str().map(str::parse::<Timeframe>) {
                Some(Ok(timeframe)) => Some(timeframe),
                Some(Err(_)) | None => {
                    skipped.push(format!("{TIMEFRAME_KEY}: {}", describe(value)));
                    None
                }
            },
        };

        Self {
            metric_types,
            timeframe: requested.or(stored).unwrap_or_default(),
            skipped,
        }
    }
}

fn describe(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}

/// Data a widget renders for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsWidgetData {
    /// Source configuration.
    pub config_id: AnalyticsConfigId,
    /// Source configuration type.
    #[serde(rename = "type")]
    pub config_type: ConfigType,
    /// Source configuration name.
    pub name: ConfigName,
    /// Selected metric types.
    pub metric_types: Vec<MetricType>,
    /// Window aggregated over.
    pub timeframe: Timeframe,
    /// Window start.
    pub from: DateTime<Utc>,
    /// Window end.
    pub to: DateTime<Utc>,
    /// Aggregates for the selected types.
    pub summaries: Vec<MetricSummary>,
    /// Daily series for the selected types.
    pub series: Vec<MetricSeries>,
}

impl AnalyticsWidgetData {
    /// Combine a configuration, its selection and the metric snapshot.
    #[must_use]
    pub fn assemble(
        config: &AnalyticsConfig,
        selection: WidgetSelection,
        snapshot: MetricSnapshot,
    ) -> Self {
        Self {
            config_id: *config.id(),
            config_type: config.config_type(),
            name: config.name().clone(),
            metric_types: selection.metric_types,
            timeframe: snapshot.timeframe,
            from: snapshot.from,
            to: snapshot.to,
            summaries: snapshot.summaries,
            series: snapshot.series,
        }
    }
}
