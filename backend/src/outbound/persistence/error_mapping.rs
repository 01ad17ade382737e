//! Shared Diesel error classification for repositories.
//!
//! Repositories turn a [`DieselFailure`] into their own port error. Messages
//! are fixed strings; the raw database text only reaches the debug log.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// What went wrong, reduced to the cases ports distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped or could not be used.
    Connection(&'static str),
    /// A foreign key check failed.
    ForeignKey { constraint: Option<String> },
    /// A unique constraint was violated.
    Unique { constraint: Option<String> },
    /// Anything else.
    Query(&'static str),
}

/// Extract the message from a pool error.
pub(crate) fn pool_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Log and classify a Diesel error.
pub(crate) fn classify(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKey {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::Unique {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        _ => DieselFailure::Query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info {
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    fn foreign_key_keeps_constraint_name() {
        let failure = classify(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("invoices_vendor_fkey"),
        ));
        assert_eq!(
            failure,
            DieselFailure::ForeignKey {
                constraint: Some("invoices_vendor_fkey".to_owned())
            }
        );
    }

    #[rstest]
    fn unique_keeps_constraint_name() {
        let failure = classify(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("invoices_number_key"),
        ));
        assert!(matches!(failure, DieselFailure::Unique { constraint: Some(name) } if name == "invoices_number_key"));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, None), DieselFailure::Connection("database connection error"))]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found"))]
    #[case(database_error(DatabaseErrorKind::CheckViolation, None), DieselFailure::Query("database error"))]
    fn other_errors(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify(error), expected);
    }

    #[rstest]
    fn pool_message_unwraps_both_variants() {
        assert_eq!(pool_message(PoolError::checkout("timeout")), "timeout");
        assert_eq!(pool_message(PoolError::build("bad url")), "bad url");
    }
}
