//! PostgreSQL-backed `MetricsRepository` implementation.
//!
//! Seeding writes the `metric_seed_runs` marker first with
//! `ON CONFLICT DO NOTHING`; a second seeder inserts zero marker rows and
//! stops, so samples are written at most once per organization.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{MetricsRepository, MetricsRepositoryError};
use crate::domain::{MetricType, OrganizationId, SeedOutcome, SustainabilityMetric};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::models::{MetricRow, NewSeedRunRow};
use super::pool::{DbPool, PoolError};
use super::schema::{metric_seed_runs, sustainability_metrics};

/// Rows per `INSERT`; keeps bind parameters well under the PostgreSQL limit.
const INSERT_CHUNK: usize = 1_000;

/// Diesel-backed implementation of the `MetricsRepository` port.
#[derive(Clone)]
pub struct DieselMetricsRepository {
    pool: DbPool,
}

impl DieselMetricsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MetricsRepositoryError {
    MetricsRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> MetricsRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => MetricsRepositoryError::connection(message),
        DieselFailure::ForeignKey { .. } => MetricsRepositoryError::query("unknown organization"),
        DieselFailure::Unique { .. } => MetricsRepositoryError::query("duplicate sample"),
        DieselFailure::Query(message) => MetricsRepositoryError::query(message),
    }
}

#[async_trait]
impl MetricsRepository for DieselMetricsRepository {
    async fn seed_run_exists(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<bool, MetricsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            metric_seed_runs::table
                .filter(metric_seed_runs::organization_id.eq(organization_id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn seed(
        &self,
        organization_id: &OrganizationId,
        samples: &[SustainabilityMetric],
        seeded_at: DateTime<Utc>,
    ) -> Result<SeedOutcome, MetricsRepositoryError> {
        let marker = NewSeedRunRow {
            organization_id: *organization_id.as_uuid(),
            samples: i32::try_from(samples.len())
                .map_err(|_| MetricsRepositoryError::query("too many samples for one seed run"))?,
            seeded_at,
        };
        let rows: Vec<MetricRow> = samples.iter().map(MetricRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let claimed = diesel::insert_into(metric_seed_runs::table)
                    .values(&marker)
                    .on_conflict(metric_seed_runs::organization_id)
                    .do_nothing()
                    .execute(conn)
                    .await?;
                if claimed == 0 {
                    return Ok(SeedOutcome::AlreadySeeded);
                }
                for chunk in rows.chunks(INSERT_CHUNK) {
                    diesel::insert_into(sustainability_metrics::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                Ok(SeedOutcome::Seeded {
                    samples: rows.len(),
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn samples_since(
        &self,
        organization_id: &OrganizationId,
        since: DateTime<Utc>,
        metric_types: &[MetricType],
    ) -> Result<Vec<SustainabilityMetric>, MetricsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = sustainability_metrics::table
            .filter(sustainability_metrics::organization_id.eq(organization_id.as_uuid()))
            .filter(sustainability_metrics::recorded_at.ge(since))
            .select(MetricRow::as_select())
            .order(sustainability_metrics::recorded_at.asc())
            .into_boxed();
        if !metric_types.is_empty() {
            let names: Vec<&str> = metric_types.iter().map(|metric| metric.as_str()).collect();
            query = query.filter(sustainability_metrics::metric_type.eq_any(names));
        }
        let rows: Vec<MetricRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| SustainabilityMetric::try_from(row).map_err(MetricsRepositoryError::query))
            .collect()
    }
}
