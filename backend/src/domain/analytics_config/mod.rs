//! Saved chart, analysis and report configurations.
//!
//! Builders submit a [`AnalyticsConfigDraft`]; the library groups stored
//! configurations by [`ConfigType`]. Standard configurations are seeded per
//! organization and can only be switched on or off.

mod standard;
mod widget;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use super::vocabulary::{text_enum, uuid_identifier};
use super::OrganizationId;

pub use standard::standard_configs;
pub use widget::{AnalyticsWidgetData, WidgetSelection};

/// Maximum configuration name length in characters.
pub const CONFIG_NAME_MAX: usize = 120;

uuid_identifier! {
    /// Analytics configuration identifier.
    AnalyticsConfigId
}

text_enum! {
    /// Kind of saved configuration.
    pub enum ConfigType as "config type" {
        /// A chart widget.
        Chart => "chart",
        /// A narrative analysis panel.
        Analysis => "analysis",
        /// A scheduled report.
        Report => "report",
    }
}

text_enum! {
    /// Delivery cadence for report configurations.
    pub enum ReportSchedule as "report schedule" {
        /// Every day.
        Daily => "daily",
        /// Every week.
        Weekly => "weekly",
        /// Every month.
        Monthly => "monthly",
        /// Every quarter.
        Quarterly => "quarterly",
    }
}

/// Reasons a draft or update is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsConfigValidationError {
    /// Name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeded [`CONFIG_NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// The `config` payload was not a JSON object.
    #[error("config must be a JSON object")]
    ConfigNotObject,
    /// A schedule was supplied for a chart or analysis.
    #[error("schedule is only accepted for report configurations, not {config_type}")]
    ScheduleNotAllowed {
        /// Type the schedule was rejected for.
        config_type: ConfigType,
    },
}

impl AnalyticsConfigValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::ConfigNotObject => "config",
            Self::ScheduleNotAllowed { .. } => "schedule",
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::ConfigNotObject => "config_not_object",
            Self::ScheduleNotAllowed { .. } => "schedule_not_allowed",
        }
    }
}

impl From<AnalyticsConfigValidationError> for super::Error {
    fn from(err: AnalyticsConfigValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}

/// Trimmed configuration name of 1 to [`CONFIG_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigName(String);

impl ConfigName {
    /// Validate and trim a name.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigValidationError::EmptyName`] or
    /// [`AnalyticsConfigValidationError::NameTooLong`].
    ///
    /// # Examples
    /// ```
    /// use wasteflow::domain::ConfigName;
    ///
    /// assert_eq!(ConfigName::new("  Weekly waste ").unwrap().as_ref(), "Weekly waste");
    /// assert!(ConfigName::new("   ").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, AnalyticsConfigValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AnalyticsConfigValidationError::EmptyName);
        }
        if trimmed.chars().count() > CONFIG_NAME_MAX {
            return Err(AnalyticsConfigValidationError::NameTooLong {
                max: CONFIG_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ConfigName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConfigName {
    type Error = AnalyticsConfigValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ConfigName> for String {
    fn from(value: ConfigName) -> Self {
        value.0
    }
}

fn require_object(config: Value) -> Result<Map<String, Value>, AnalyticsConfigValidationError> {
    match config {
        Value::Object(map) => Ok(map),
        _ => Err(AnalyticsConfigValidationError::ConfigNotObject),
    }
}

fn check_schedule(
    config_type: ConfigType,
    schedule: Option<ReportSchedule>,
) -> Result<(), AnalyticsConfigValidationError> {
    match (config_type, schedule) {
        (ConfigType::Report, _) | (_, None) => Ok(()),
        (other, Some(_)) => Err(AnalyticsConfigValidationError::ScheduleNotAllowed {
            config_type: other,
        }),
    }
}

/// Validated builder submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfigDraft {
    config_type: ConfigType,
    name: ConfigName,
    config: Map<String, Value>,
    active: bool,
    schedule: Option<ReportSchedule>,
}

impl AnalyticsConfigDraft {
    /// Validate a builder submission. `active` defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigValidationError`] for a bad name, a non-object
    /// payload or a schedule on a non-report type.
    pub fn new(
        config_type: ConfigType,
        name: &str,
        config: Value,
        active: Option<bool>,
        schedule: Option<ReportSchedule>,
    ) -> Result<Self, AnalyticsConfigValidationError> {
        let name = ConfigName::new(name)?;
        let config = require_object(config)?;
        check_schedule(config_type, schedule)?;
        Ok(Self {
            config_type,
            name,
            config,
            active: active.unwrap_or(true),
            schedule,
        })
    }

    /// Submitted type.
    #[must_use]
    pub const fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Submitted name.
    #[must_use]
    pub const fn name(&self) -> &ConfigName {
        &self.name
    }
}

/// Replacement values for `PUT /analytics/configs/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfigUpdate {
    name: ConfigName,
    config: Map<String, Value>,
    active: bool,
    schedule: Option<ReportSchedule>,
}

impl AnalyticsConfigUpdate {
    /// Validate replacement values. The schedule is checked against the stored
    /// type when the update is applied.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigValidationError`] for a bad name or a non-object
    /// payload.
    pub fn new(
        name: &str,
        config: Value,
        active: bool,
        schedule: Option<ReportSchedule>,
    ) -> Result<Self, AnalyticsConfigValidationError> {
        Ok(Self {
            name: ConfigName::new(name)?,
            config: require_object(config)?,
            active,
            schedule,
        })
    }

    /// Replacement name.
    #[must_use]
    pub const fn name(&self) -> &ConfigName {
        &self.name
    }
}

/// Why an update could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsConfigUpdateError {
    /// Standard configurations only accept a change to `active`.
    #[error("standard configurations can only be activated or deactivated")]
    StandardLocked,
    /// The replacement failed validation against the stored type.
    #[error(transparent)]
    Invalid(#[from] AnalyticsConfigValidationError),
}

/// Stored configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    id: AnalyticsConfigId,
    organization_id: OrganizationId,
    #[serde(rename = "type")]
    config_type: ConfigType,
    name: ConfigName,
    config: Map<String, Value>,
    active: bool,
    is_standard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<ReportSchedule>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Column values for rebuilding a stored configuration.
#[derive(Debug, Clone)]
pub struct AnalyticsConfigParts {
    /// Identifier.
    pub id: AnalyticsConfigId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Configuration type.
    pub config_type: ConfigType,
    /// Validated name.
    pub name: ConfigName,
    /// JSON object payload.
    pub config: Map<String, Value>,
    /// Whether the item is shown.
    pub active: bool,
    /// Whether the item was seeded.
    pub is_standard: bool,
    /// Report cadence.
    pub schedule: Option<ReportSchedule>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl AnalyticsConfig {
    /// Store a client draft for `organization_id`.
    #[must_use]
    pub fn from_draft(
        organization_id: OrganizationId,
        draft: AnalyticsConfigDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AnalyticsConfigId::random(),
            organization_id,
            config_type: draft.config_type,
            name: draft.name,
            config: draft.config,
            active: draft.active,
            is_standard: false,
            schedule: draft.schedule,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a configuration read from storage.
    #[must_use]
    pub fn from_parts(parts: AnalyticsConfigParts) -> Self {
        let AnalyticsConfigParts {
            id,
            organization_id,
            config_type,
            name,
            config,
            active,
            is_standard,
            schedule,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            organization_id,
            config_type,
            name,
            config,
            active,
            is_standard,
            schedule,
            created_at,
            updated_at,
        }
    }

    /// Apply an update, returning the revised configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsConfigUpdateError::StandardLocked`] when a standard
    /// item would change anything but `active`, or
    /// [`AnalyticsConfigUpdateError::Invalid`] when the schedule does not fit
    /// the stored type.
    pub fn revise(
        &self,
        update: AnalyticsConfigUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, AnalyticsConfigUpdateError> {
        if self.is_standard
            && (update.name != self.name
                || update.config != self.config
                || update.schedule != self.schedule)
        {
            return Err(AnalyticsConfigUpdateError::StandardLocked);
        }
        check_schedule(self.config_type, update.schedule)?;
        Ok(Self {
            name: update.name,
            config: update.config,
            active: update.active,
            schedule: update.schedule,
            updated_at: now,
            ..self.clone()
        })
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> &AnalyticsConfigId {
        &self.id
    }

    /// Owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    /// Configuration type.
    #[must_use]
    pub const fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Name, unique per organization and type.
    #[must_use]
    pub const fn name(&self) -> &ConfigName {
        &self.name
    }

    /// Builder payload.
    #[must_use]
    pub const fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Whether the item is shown.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Whether the item was seeded rather than client-created.
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        self.is_standard
    }

    /// Report cadence.
    #[must_use]
    pub const fn schedule(&self) -> Option<ReportSchedule> {
        self.schedule
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Stored configurations grouped by type.
///
/// Each group lists standard items first, then the rest, both by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfigLibrary {
    /// Chart configurations.
    pub charts: Vec<AnalyticsConfig>,
    /// Analysis configurations.
    pub analyses: Vec<AnalyticsConfig>,
    /// Report configurations.
    pub reports: Vec<AnalyticsConfig>,
}

impl AnalyticsConfigLibrary {
    /// Group and order configurations.
    #[must_use]
    pub fn from_configs(configs: Vec<AnalyticsConfig>) -> Self {
        let mut library = Self::default();
        for config in configs {
            match config.config_type {
                ConfigType::Chart => library.charts.push(config),
                ConfigType::Analysis => library.analyses.push(config),
                ConfigType::Report => library.reports.push(config),
            }
        }
        for group in [
            &mut library.charts,
            &mut library.analyses,
            &mut library.reports,
        ] {
            group.sort_by(|left, right| {
                right.is_standard.cmp(&left.is_standard).then_with(|| {
                    left.name
                        .as_ref()
                        .to_lowercase()
                        .cmp(&right.name.as_ref().to_lowercase())
                })
            });
        }
        library
    }
}
