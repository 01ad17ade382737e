//! Analytics configuration library handlers.
//!
//! ```text
//! GET    /api/v1/analytics/configs
//! POST   /api/v1/analytics/configs {"type":"chart","name":"Trend","config":{}}
//! GET    /api/v1/analytics/configs/{id}
//! PUT    /api/v1/analytics/configs/{id}
//! DELETE /api/v1/analytics/configs/{id}
//! GET    /api/v1/analytics/configs/{id}/data?timeframe=week
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AnalyticsConfig, AnalyticsConfigDraft, AnalyticsConfigId, AnalyticsConfigLibrary,
    AnalyticsConfigUpdate, AnalyticsWidgetData, ConfigType, Principal, ReportSchedule, Timeframe,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AnalyticsConfigLibrarySchema, AnalyticsConfigSchema, AnalyticsWidgetDataSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_vocabulary, parse_vocabulary,
};

const ID_FIELD: FieldName = FieldName::new("id");
const TYPE_FIELD: FieldName = FieldName::new("type");
const SCHEDULE_FIELD: FieldName = FieldName::new("schedule");
const TIMEFRAME_FIELD: FieldName = FieldName::new("timeframe");

/// Builder submission for `POST /api/v1/analytics/configs`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfigRequest {
    /// `chart`, `analysis` or `report`.
    #[serde(rename = "type")]
    pub config_type: String,
    pub name: String,
    /// Builder payload; must be a JSON object.
    #[schema(value_type = Object)]
    pub config: Value,
    /// Defaults to `true`.
    #[serde(default)]
    pub active: Option<bool>,
    /// Report delivery cadence.
    #[serde(default)]
    pub schedule: Option<String>,
}

/// Replacement values for `PUT /api/v1/analytics/configs/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfigUpdateRequest {
    pub name: String,
    #[schema(value_type = Object)]
    pub config: Value,
    pub active: bool,
    #[serde(default)]
    pub schedule: Option<String>,
}

/// Query string for widget data.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WidgetDataQuery {
    /// Overrides the timeframe stored in the configuration.
    pub timeframe: Option<String>,
}

impl TryFrom<AnalyticsConfigRequest> for AnalyticsConfigDraft {
    type Error = crate::domain::Error;

    fn try_from(request: AnalyticsConfigRequest) -> Result<Self, Self::Error> {
        let config_type: ConfigType = parse_vocabulary(&request.config_type, TYPE_FIELD)?;
        let schedule: Option<ReportSchedule> =
            parse_optional_vocabulary(request.schedule.as_deref(), SCHEDULE_FIELD)?;
        Ok(Self::new(
            config_type,
            &request.name,
            request.config,
            request.active,
            schedule,
        )?)
    }
}

impl TryFrom<AnalyticsConfigUpdateRequest> for AnalyticsConfigUpdate {
    type Error = crate::domain::Error;

    fn try_from(request: AnalyticsConfigUpdateRequest) -> Result<Self, Self::Error> {
        let schedule: Option<ReportSchedule> =
            parse_optional_vocabulary(request.schedule.as_deref(), SCHEDULE_FIELD)?;
        Ok(Self::new(
            &request.name,
            request.config,
            request.active,
            schedule,
        )?)
    }
}

fn config_id(raw: &str) -> ApiResult<AnalyticsConfigId> {
    parse_id(raw, ID_FIELD)
}

/// Library of configurations grouped by type.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/configs",
    responses(
        (status = 200, description = "Configuration library", body = AnalyticsConfigLibrarySchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "listAnalyticsConfigs"
)]
#[get("/analytics/configs")]
pub async fn list_analytics_configs(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<AnalyticsConfigLibrary>> {
    let library = state
        .analytics_configs_query
        .library(principal.organization_id())
        .await?;
    Ok(web::Json(library))
}

/// Store a builder submission as a custom configuration.
#[utoipa::path(
    post,
    path = "/api/v1/analytics/configs",
    request_body = AnalyticsConfigRequest,
    responses(
        (status = 201, description = "Stored configuration", body = AnalyticsConfigSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Name already used for this type", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "createAnalyticsConfig"
)]
#[post("/analytics/configs")]
pub async fn create_analytics_config(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<AnalyticsConfigRequest>,
) -> ApiResult<HttpResponse> {
    let draft = AnalyticsConfigDraft::try_from(payload.into_inner())?;
    let stored: AnalyticsConfig = state
        .analytics_configs
        .create(principal.organization_id(), draft)
        .await?;
    Ok(HttpResponse::Created().json(stored))
}

/// One configuration.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/configs/{id}",
    params(("id" = String, Path, description = "Configuration identifier")),
    responses(
        (status = 200, description = "Configuration", body = AnalyticsConfigSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "getAnalyticsConfig"
)]
#[get("/analytics/configs/{id}")]
pub async fn get_analytics_config(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<AnalyticsConfig>> {
    let id = config_id(&path)?;
    let config = state
        .analytics_configs_query
        .get(principal.organization_id(), &id)
        .await?;
    Ok(web::Json(config))
}

/// Replace name, payload, active flag and schedule.
///
/// Standard configurations only accept a change to `active`.
#[utoipa::path(
    put,
    path = "/api/v1/analytics/configs/{id}",
    params(("id" = String, Path, description = "Configuration identifier")),
    request_body = AnalyticsConfigUpdateRequest,
    responses(
        (status = 200, description = "Updated configuration", body = AnalyticsConfigSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Standard configuration is locked", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already used for this type", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "updateAnalyticsConfig"
)]
#[put("/analytics/configs/{id}")]
pub async fn update_analytics_config(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    payload: web::Json<AnalyticsConfigUpdateRequest>,
) -> ApiResult<web::Json<AnalyticsConfig>> {
    let id = config_id(&path)?;
    let update = AnalyticsConfigUpdate::try_from(payload.into_inner())?;
    let updated = state
        .analytics_configs
        .update(principal.organization_id(), &id, update)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a custom configuration.
#[utoipa::path(
    delete,
    path = "/api/v1/analytics/configs/{id}",
    params(("id" = String, Path, description = "Configuration identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Standard configuration", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "deleteAnalyticsConfig"
)]
#[delete("/analytics/configs/{id}")]
pub async fn delete_analytics_config(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = config_id(&path)?;
    state
        .analytics_configs
        .delete(principal.organization_id(), &id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Data for rendering one configuration as a widget.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/configs/{id}/data",
    params(
        ("id" = String, Path, description = "Configuration identifier"),
        WidgetDataQuery
    ),
    responses(
        (status = 200, description = "Widget data", body = AnalyticsWidgetDataSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "getAnalyticsConfigData"
)]
#[get("/analytics/configs/{id}/data")]
pub async fn get_analytics_config_data(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    query: web::Query<WidgetDataQuery>,
) -> ApiResult<web::Json<AnalyticsWidgetData>> {
    let id = config_id(&path)?;
    let timeframe: Option<Timeframe> =
        parse_optional_vocabulary(query.timeframe.as_deref(), TIMEFRAME_FIELD)?;
    let data = state
        .analytics_configs_query
        .widget_data(principal.organization_id(), &id, timeframe)
        .await?;
    Ok(web::Json(data))
}

#[cfg(test)]
#[path = "analytics_tests.rs"]
mod tests;
