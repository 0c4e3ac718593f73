use thiserror::Error;

/// Result type alias using PicoleError
pub type Result<T> = std::result::Result<T, PicoleError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure of a repository operation is classified into one of these
/// kinds. Each kind maps to a stable error code that log consumers and the
/// CLI can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Argument shape (raised before any I/O)
    InvalidArgument,

    // Required value missing after normalization
    MissingValue,
    NotFound,

    // Persistence integrity
    Duplicate,
    MissingForeignKey,
    StillReferenced,
    ConstraintViolation,

    // Integration
    Configuration,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::MissingValue => "ERR_MISSING_VALUE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Duplicate => "ERR_DUPLICATE",
            ExErrorKind::MissingForeignKey => "ERR_MISSING_FOREIGN_KEY",
            ExErrorKind::StillReferenced => "ERR_STILL_REFERENCED",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification fields used for logging and for machine-readable
/// CLI output, plus a human-readable message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    record_id: Option<i64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            record_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (table model) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add record id context
    pub fn with_record_id(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the record id context, if any
    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(id) = self.record_id {
            write!(f, " (record_id: {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for repository operations
///
/// Variants fall into three tiers: argument-shape errors raised before any
/// I/O (`InvalidArgument`), missing values detected after normalization
/// (`MissingValue`, `NotFound`), and integrity errors translated from the
/// storage engine (`Duplicate`, `MissingForeignKey`, `StillReferenced`,
/// `Integrity`). Anything else surfaces as `Persistence`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PicoleError {
    // ===== Argument shape =====
    /// An argument has the wrong shape (non-positive id, non-finite money, bad length)
    #[error("Invalid {field} for {entity}: {reason}")]
    InvalidArgument {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },

    // ===== Missing values =====
    /// A required value was blank after normalization
    #[error("{field} of {entity} not provided")]
    MissingValue {
        entity: &'static str,
        field: &'static str,
    },

    /// No row with the given id
    #[error("{entity} with id={id} is not registered")]
    NotFound { entity: &'static str, id: i64 },

    // ===== Integrity =====
    /// A natural key collided with an existing row
    #[error("{entity} with {field} '{value}' already exists; {field} must be unique")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A foreign key points at a row that does not exist
    #[error("Integrity error on {entity}: check that the referenced rows exist ({references})")]
    MissingForeignKey {
        entity: &'static str,
        references: String,
    },

    /// Delete refused because other tables still reference the row
    #[error("{entity} with id={id} cannot be deleted: it may be referenced by rows in table(s) {}", .tables.join(", "))]
    StillReferenced {
        entity: &'static str,
        id: i64,
        tables: Vec<String>,
    },

    /// Any other constraint failure reported by the storage engine
    #[error("Integrity error on {entity}: {message}")]
    Integrity {
        entity: &'static str,
        message: String,
    },

    // ===== Generic =====
    /// Unrecognized storage failure
    #[error("Persistence error in {op}: {message}")]
    Persistence { op: String, message: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl PicoleError {
    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            PicoleError::InvalidArgument { .. } => ExErrorKind::InvalidArgument,
            PicoleError::MissingValue { .. } => ExErrorKind::MissingValue,
            PicoleError::NotFound { .. } => ExErrorKind::NotFound,
            PicoleError::Duplicate { .. } => ExErrorKind::Duplicate,
            PicoleError::MissingForeignKey { .. } => ExErrorKind::MissingForeignKey,
            PicoleError::StillReferenced { .. } => ExErrorKind::StillReferenced,
            PicoleError::Integrity { .. } => ExErrorKind::ConstraintViolation,
            PicoleError::Persistence { .. } => ExErrorKind::Persistence,
            PicoleError::Configuration { .. } => ExErrorKind::Configuration,
            PicoleError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }
}

/// Conversion from PicoleError to ExError
///
/// Used by `log_op_error!` so every failure is logged with a stable code.
impl From<PicoleError> for ExError {
    fn from(err: PicoleError) -> Self {
        let base = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            PicoleError::InvalidArgument { entity, .. }
            | PicoleError::MissingValue { entity, .. }
            | PicoleError::Duplicate { entity, .. }
            | PicoleError::MissingForeignKey { entity, .. }
            | PicoleError::Integrity { entity, .. } => base.with_entity(entity),
            PicoleError::NotFound { entity, id }
            | PicoleError::StillReferenced { entity, id, .. } => {
                base.with_entity(entity).with_record_id(id)
            }
            PicoleError::Persistence { op, .. } => base.with_op(op),
            PicoleError::Configuration { .. } | PicoleError::Serialization { .. } => base,
        }
    }
}

impl From<serde_json::Error> for PicoleError {
    fn from(err: serde_json::Error) -> Self {
        PicoleError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidArgument,
            ExErrorKind::MissingValue,
            ExErrorKind::NotFound,
            ExErrorKind::Duplicate,
            ExErrorKind::MissingForeignKey,
            ExErrorKind::StillReferenced,
            ExErrorKind::ConstraintViolation,
            ExErrorKind::Configuration,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_still_referenced_message_lists_tables() {
        let err = PicoleError::StillReferenced {
            entity: "Sabor",
            id: 3,
            tables: vec!["picole".to_string(), "sabor_extra".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("id=3"));
        assert!(msg.contains("picole, sabor_extra"));
    }

    #[test]
    fn test_conversion_keeps_record_id() {
        let ex: ExError = PicoleError::NotFound {
            entity: "Lote",
            id: 42,
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.code(), "ERR_NOT_FOUND");
        assert_eq!(ex.entity(), Some("Lote"));
        assert_eq!(ex.record_id(), Some(42));
    }

    #[test]
    fn test_display_includes_code_and_op() {
        let ex = ExError::new(ExErrorKind::Persistence)
            .with_op("migration")
            .with_message("boom");
        let s = ex.to_string();
        assert!(s.starts_with("[ERR_PERSISTENCE]"));
        assert!(s.contains("'migration'"));
        assert!(s.contains("boom"));
    }

    #[test]
    fn test_json_failure_is_serialization_kind() {
        let json_err = serde_json::from_str::<i64>("not a number").unwrap_err();
        let err: PicoleError = json_err.into();
        assert!(matches!(err, PicoleError::Serialization { .. }));
        let ex: ExError = err.into();
        assert_eq!(ex.code(), "ERR_SERIALIZATION");
    }
}
