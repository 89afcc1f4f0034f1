//! Translation of engine errors into [`ResvError`].
//!
//! The engine reports a failed foreign key the same way whether a child
//! points at a missing parent or a parent still has children, so the
//! statement's action decides which of the two it was.

use roomresv_core::errors::{ConstraintViolation, ResvError, ResvResult};
use sqlx::error::ErrorKind;
use tracing::warn;

/// The kind of statement that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Insert,
    Update,
    Delete,
}

pub fn classify(err: sqlx::Error, action: WriteAction, table: &'static str) -> ResvError {
    let db_err = match err {
        sqlx::Error::Database(db_err) => db_err,
        other => return ResvError::Database(other.into()),
    };

    let foreign_key = is_foreign_key_failure(
        db_err.kind(),
        db_err.code().as_deref(),
        db_err.message(),
    );

    let violation = match db_err.kind() {
        _ if foreign_key => match action {
            WriteAction::Delete => ConstraintViolation::RestrictedDelete { table },
            WriteAction::Insert | WriteAction::Update => ConstraintViolation::MissingParent { table },
        },
        ErrorKind::CheckViolation => ConstraintViolation::Check {
            table,
            constraint: check_name(db_err.message()),
        },
        ErrorKind::UniqueViolation => ConstraintViolation::Unique { table },
        ErrorKind::NotNullViolation => ConstraintViolation::NotNull { table },
        _ => return ResvError::Database(sqlx::Error::Database(db_err).into()),
    };

    warn!("{:?} on {} rejected: {}", action, table, violation);
    ResvError::Constraint(violation)
}

/// SQLite raises a blocked `ON DELETE RESTRICT` as a trigger constraint
/// (extended code 1811) rather than as a foreign key error, with the same
/// message as every other foreign key failure.
fn is_foreign_key_failure(kind: ErrorKind, code: Option<&str>, message: &str) -> bool {
    matches!(kind, ErrorKind::ForeignKeyViolation)
        || code == Some(SQLITE_CONSTRAINT_TRIGGER)
        || message.starts_with("FOREIGN KEY constraint failed")
}

const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Extracts `name` from "CHECK constraint failed: name".
fn check_name(message: &str) -> Option<String> {
    message
        .split_once("CHECK constraint failed:")
        .map(|(_, name)| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Attaches statement context to sqlx results.
pub trait DbResultExt<T> {
    fn on_write(self, action: WriteAction, table: &'static str) -> ResvResult<T>;
    fn on_read(self) -> ResvResult<T>;
}

impl<T> DbResultExt<T> for Result<T, sqlx::Error> {
    fn on_write(self, action: WriteAction, table: &'static str) -> ResvResult<T> {
        self.map_err(|e| classify(e, action, table))
    }

    fn on_read(self) -> ResvResult<T> {
        self.map_err(|e| ResvError::Database(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_name() {
        assert_eq!(
            check_name("CHECK constraint failed: valid_time_range"),
            Some("valid_time_range".to_string())
        );
        assert_eq!(check_name("CHECK constraint failed: "), None);
        assert_eq!(check_name("FOREIGN KEY constraint failed"), None);
    }

    #[test]
    fn test_restrict_trigger_counts_as_foreign_key_failure() {
        assert!(is_foreign_key_failure(
            ErrorKind::Other,
            Some("1811"),
            "FOREIGN KEY constraint failed"
        ));
        assert!(is_foreign_key_failure(
            ErrorKind::Other,
            None,
            "FOREIGN KEY constraint failed"
        ));
        assert!(is_foreign_key_failure(
            ErrorKind::ForeignKeyViolation,
            Some("787"),
            "FOREIGN KEY constraint failed"
        ));
        assert!(!is_foreign_key_failure(
            ErrorKind::CheckViolation,
            Some("275"),
            "CHECK constraint failed: valid_time_range"
        ));
    }

    #[test]
    fn test_non_database_errors_are_not_constraints() {
        let err = classify(sqlx::Error::RowNotFound, WriteAction::Delete, "rooms");
        assert!(matches!(err, ResvError::Database(_)));
    }
}
