//! Seed synthetic sustainability metrics for one organization.
//!
//! Running it twice is harmless: the seed run marker makes the second run a
//! no-op. Progress is logged to stderr; the outcome is printed to stdout as
//! `key=value` lines.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use wasteflow::domain::{
    DEFAULT_HISTORY_DAYS, FIXTURE_ORGANIZATION_ID, MetricsService, OrganizationId, SeedOutcome,
};
use wasteflow::outbound::persistence::{
    DbPool, DieselMetricsRepository, PoolConfig, run_pending_migrations,
};

/// `seed-metrics` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-metrics",
    about = "Seed a synthetic metric history for one organization",
    version
)]
struct CliArgs {
    /// Organization to seed. Defaults to the fixture organization.
    #[arg(long = "organization-id", value_name = "uuid", default_value = FIXTURE_ORGANIZATION_ID)]
    organization_id: OrganizationId,
    /// Days of history to generate.
    #[arg(long = "days", value_name = "n", default_value_t = DEFAULT_HISTORY_DAYS)]
    days: u32,
    /// Apply pending migrations first.
    #[arg(long = "migrate")]
    migrate: bool,
    /// Database connection URL.
    #[arg(long = "database-url", value_name = "url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

impl CliArgs {
    fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| eyre!("pass --database-url or set DATABASE_URL"))
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    let report = runtime.block_on(run(&args))?;
    io::stdout()
        .lock()
        .write_all(report.as_bytes())
        .wrap_err("failed to write seeding report")
}

async fn run(args: &CliArgs) -> Result<String> {
    let database_url = args.database_url()?.to_owned();
    let mut report = String::new();
    if args.migrate {
        let url = database_url.clone();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .wrap_err("migration task panicked")??;
        info!(applied, "database migrations complete");
        report.push_str(&format!("migrations_applied={applied}\n"));
    }

    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(2))
        .await
        .wrap_err("failed to create database pool")?;
    let service = MetricsService::new(
        Arc::new(DieselMetricsRepository::new(pool)),
        Arc::new(DefaultClock),
    )
    .with_history_days(args.days);

    let outcome = service
        .ensure_seeded(&args.organization_id)
        .await
        .map_err(|error| eyre!("seeding failed: {error}"))?;
    report.push_str(&outcome_report(&args.organization_id, outcome));
    Ok(report)
}

fn outcome_report(organization_id: &OrganizationId, outcome: SeedOutcome) -> String {
    let mut report = format!("organization_id={organization_id}\n");
    match outcome {
        SeedOutcome::Seeded { samples } => {
            report.push_str(&format!("status=seeded\nsamples={samples}\n"));
        }
        SeedOutcome::AlreadySeeded => report.push_str("status=already_seeded\n"),
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_the_fixture_organization() {
        let _guard = lock_env([("DATABASE_URL", None::<String>)]);

        let args = CliArgs::try_parse_from(["seed-metrics"]).expect("defaults parse");

        assert_eq!(args.organization_id.to_string(), FIXTURE_ORGANIZATION_ID);
        assert_eq!(args.days, DEFAULT_HISTORY_DAYS);
        assert!(!args.migrate);
        assert!(args.database_url().is_err());
    }

    #[rstest]
    fn rejects_malformed_organization_ids() {
        assert!(CliArgs::try_parse_from(["seed-metrics", "--organization-id", "acme"]).is_err());
    }

    #[rstest]
    fn database_url_comes_from_the_environment() {
        let _guard = lock_env([("DATABASE_URL", Some("postgres://env/wasteflow".to_owned()))]);

        let args = CliArgs::try_parse_from(["seed-metrics"]).expect("parse");

        assert_eq!(args.database_url().expect("env url"), "postgres://env/wasteflow");
    }

    #[rstest]
    fn explicit_url_wins_over_the_environment() {
        let _guard = lock_env([("DATABASE_URL", Some("postgres://env/wasteflow".to_owned()))]);

        let args =
            CliArgs::try_parse_from(["seed-metrics", "--database-url", "postgres://db/wasteflow"])
                .expect("parse");

        assert_eq!(args.database_url().expect("explicit url"), "postgres://db/wasteflow");
    }

    #[rstest]
    fn blank_url_is_rejected() {
        let _guard = lock_env([("DATABASE_URL", Some("   ".to_owned()))]);

        let args = CliArgs::try_parse_from(["seed-metrics"]).expect("parse");

        assert!(args.database_url().is_err());
    }

    #[rstest]
    #[case(SeedOutcome::Seeded { samples: 12 }, "status=seeded\nsamples=12\n")]
    #[case(SeedOutcome::AlreadySeeded, "status=already_seeded\n")]
    fn report_lists_the_outcome(#[case] outcome: SeedOutcome, #[case] tail: &str) {
        let organization_id: OrganizationId = FIXTURE_ORGANIZATION_ID.parse().expect("fixture id");

        let report = outcome_report(&organization_id, outcome);

        assert_eq!(report, format!("organization_id={FIXTURE_ORGANIZATION_ID}\n{tail}"));
    }
}
