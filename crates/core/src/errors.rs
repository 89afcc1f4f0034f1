use thiserror::Error;

/// A write rejected by a declarative constraint of the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A parent row could not be deleted because child rows still reference it.
    #[error("cannot delete from {table}: dependent rows exist")]
    RestrictedDelete { table: &'static str },

    /// A child row referenced a parent key that does not exist.
    #[error("{table} references a row that does not exist")]
    MissingParent { table: &'static str },

    /// A row-level CHECK failed. `constraint` is the constraint name when the
    /// engine reports one (e.g. `valid_time_range`).
    #[error("check constraint {} failed on {table}", .constraint.as_deref().unwrap_or("<unnamed>"))]
    Check {
        table: &'static str,
        constraint: Option<String>,
    },

    /// Primary key or unique conflict.
    #[error("duplicate key in {table}")]
    Unique { table: &'static str },

    #[error("required column missing in {table}")]
    NotNull { table: &'static str },
}

impl ConstraintViolation {
    pub fn table(&self) -> &'static str {
        match self {
            Self::RestrictedDelete { table }
            | Self::MissingParent { table }
            | Self::Check { table, .. }
            | Self::Unique { table }
            | Self::NotNull { table } => table,
        }
    }
}

#[derive(Error, Debug)]
pub enum ResvError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Constraint(#[from] ConstraintViolation),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ResvError {
    /// Returns the constraint violation behind this error, if any.
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint(violation) => Some(violation),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type ResvResult<T> = Result<T, ResvError>;
