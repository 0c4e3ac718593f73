//! Error handling for picole-store
//!
//! Translates rusqlite failures into the `PicoleError` taxonomy. Constraint
//! violations are recognized from the SQLite message text, which names the
//! offending table and column for UNIQUE failures only.

use picole_core::errors::PicoleError;
use rusqlite::ErrorCode;

/// Result type alias using PicoleError
pub type Result<T> = std::result::Result<T, PicoleError>;

/// Classified SQLite constraint violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// UNIQUE failure, with the bare column names (table prefix stripped)
    Unique { columns: Vec<String> },
    /// FOREIGN KEY failure; SQLite does not say which key
    ForeignKey,
    /// NOT NULL, CHECK or any other constraint
    Other(String),
}

/// Classify a rusqlite error as a constraint violation, if it is one
pub fn classify_constraint(err: &rusqlite::Error) -> Option<ConstraintViolation> {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            let message = msg.clone().unwrap_or_else(|| e.to_string());
            Some(classify_message(&message))
        }
        _ => None,
    }
}

fn classify_message(message: &str) -> ConstraintViolation {
    if let Some(rest) = message.strip_prefix("UNIQUE constraint failed: ") {
        let columns = rest
            .split(',')
            .map(|c| {
                let c = c.trim();
                c.rsplit_once('.').map_or(c, |(_, col)| col).to_string()
            })
            .collect();
        ConstraintViolation::Unique { columns }
    } else if message.contains("FOREIGN KEY constraint failed") {
        ConstraintViolation::ForeignKey
    } else {
        ConstraintViolation::Other(message.to_string())
    }
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> PicoleError {
    PicoleError::Persistence {
        op: "sqlite".to_string(),
        message: err.to_string(),
    }
}

/// Translate a failed INSERT or UPDATE
///
/// `unique` lists the natural-key columns written by the statement with
/// their values; `references` lists the foreign keys written. A UNIQUE
/// failure on a listed column becomes `Duplicate`, a FOREIGN KEY failure
/// becomes `MissingForeignKey` naming every supplied reference.
pub fn translate_write(
    entity: &'static str,
    err: rusqlite::Error,
    unique: &[(&'static str, &str)],
    references: &[(&'static str, i64)],
) -> PicoleError {
    match classify_constraint(&err) {
        Some(ConstraintViolation::Unique { columns }) => unique
            .iter()
            .find(|(field, _)| columns.iter().any(|c| c.as_str() == *field))
            .map(|(field, value)| PicoleError::Duplicate {
                entity,
                field: *field,
                value: (*value).to_string(),
            })
            .unwrap_or_else(|| PicoleError::Integrity {
                entity,
                message: err.to_string(),
            }),
        Some(ConstraintViolation::ForeignKey) => PicoleError::MissingForeignKey {
            entity,
            references: references
                .iter()
                .map(|(field, id)| format!("{}={}", field, id))
                .collect::<Vec<_>>()
                .join(", "),
        },
        Some(ConstraintViolation::Other(message)) => PicoleError::Integrity { entity, message },
        None => from_rusqlite(err),
    }
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> PicoleError {
    PicoleError::Persistence {
        op: "migration".to_string(),
        message: format!("Migration {} failed: {}", migration_id, reason),
    }
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> PicoleError {
    PicoleError::Persistence {
        op: "migration_checksum".to_string(),
        message: format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> PicoleError {
    PicoleError::Persistence {
        op: operation.to_string(),
        message: err.to_string(),
    }
}
