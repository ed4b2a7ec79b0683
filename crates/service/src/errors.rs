use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::domain::CatalogKind;

/// One rejected field of a create/update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{} with id [{id}] not found", .kind)]
    NotFound { kind: CatalogKind, id: i64 },
    #[error("invalid {} fields: {}", .kind, join_violations(.violations))]
    InvalidField { kind: CatalogKind, violations: Vec<FieldViolation> },
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(kind: CatalogKind, id: i64) -> Self { Self::NotFound { kind, id } }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 2001,
            ServiceError::InvalidField { .. } => 2002,
            ServiceError::Db(_) => 2100,
        }
    }
}
