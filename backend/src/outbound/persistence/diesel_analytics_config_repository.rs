//! PostgreSQL-backed `AnalyticsConfigRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnalyticsConfigRepository, AnalyticsConfigRepositoryError};
use crate::domain::{AnalyticsConfig, AnalyticsConfigId, OrganizationId};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::models::AnalyticsConfigRow;
use super::pool::{DbPool, PoolError};
use super::schema::analytics_configs;

const NAME_CONSTRAINT: &str = "analytics_configs_org_type_name_key";

/// Diesel-backed implementation of the `AnalyticsConfigRepository` port.
#[derive(Clone)]
pub struct DieselAnalyticsConfigRepository {
    pool: DbPool,
}

impl DieselAnalyticsConfigRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnalyticsConfigRepositoryError {
    AnalyticsConfigRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error, name: &str) -> AnalyticsConfigRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => AnalyticsConfigRepositoryError::connection(message),
        DieselFailure::Unique { constraint } if constraint.as_deref() == Some(NAME_CONSTRAINT) => {
            AnalyticsConfigRepositoryError::duplicate(name)
        }
        DieselFailure::Unique { .. } => AnalyticsConfigRepositoryError::query("unique violation"),
        DieselFailure::ForeignKey { .. } => {
            AnalyticsConfigRepositoryError::query("unknown organization")
        }
        DieselFailure::Query(message) => AnalyticsConfigRepositoryError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> AnalyticsConfigRepositoryError {
    map_diesel_error(error, "")
}

fn row_to_config(row: AnalyticsConfigRow) -> Result<AnalyticsConfig, AnalyticsConfigRepositoryError> {
    AnalyticsConfig::try_from(row).map_err(AnalyticsConfigRepositoryError::query)
}

#[async_trait]
impl AnalyticsConfigRepository for DieselAnalyticsConfigRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<AnalyticsConfig>, AnalyticsConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnalyticsConfigRow> = analytics_configs::table
            .filter(analytics_configs::organization_id.eq(organization_id.as_uuid()))
            .select(AnalyticsConfigRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(row_to_config).collect()
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<Option<AnalyticsConfig>, AnalyticsConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AnalyticsConfigRow> = analytics_configs::table
            .filter(analytics_configs::organization_id.eq(organization_id.as_uuid()))
            .filter(analytics_configs::id.eq(id.as_uuid()))
            .select(AnalyticsConfigRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_config).transpose()
    }

    async fn insert(&self, config: &AnalyticsConfig) -> Result<(), AnalyticsConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(analytics_configs::table)
            .values(AnalyticsConfigRow::from(config))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, config.name().as_ref()))
    }

    async fn update(
        &self,
        config: &AnalyticsConfig,
    ) -> Result<bool, AnalyticsConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changed = diesel::update(
            analytics_configs::table
                .filter(analytics_configs::organization_id.eq(config.organization_id().as_uuid()))
                .filter(analytics_configs::id.eq(config.id().as_uuid())),
        )
        .set(&AnalyticsConfigRow::from(config))
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, config.name().as_ref()))?;
        Ok(changed > 0)
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<bool, AnalyticsConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            analytics_configs::table
                .filter(analytics_configs::organization_id.eq(organization_id.as_uuid()))
                .filter(analytics_configs::id.eq(id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_read_error)?;
        Ok(removed > 0)
    }

    async fn insert_standard_if_absent(
        &self,
        organization_id: &OrganizationId,
        configs: &[AnalyticsConfig],
    ) -> Result<usize, AnalyticsConfigRepositoryError> {
        let rows: Vec<AnalyticsConfigRow> = configs
            .iter()
            .filter(|config| config.organization_id() == organization_id)
            .map(AnalyticsConfigRow::from)
            .collect();
        if rows.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(analytics_configs::table)
            .values(&rows)
            .on_conflict((
                analytics_configs::organization_id,
                analytics_configs::config_type,
                analytics_configs::name,
            ))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_read_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, AnalyticsConfigRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_reads_are_query_failures() {
        let error = map_read_error(diesel::result::Error::NotFound);
        assert!(matches!(error, AnalyticsConfigRepositoryError::Query { .. }));
    }
}
