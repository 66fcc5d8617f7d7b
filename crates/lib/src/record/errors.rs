//! Error types for record operations.
//!
//! Accessor preconditions on [`Record`](crate::Record) are rejected by
//! panicking with one of these errors as the message. The data model has no
//! representation for states like "field already declared during insert", so
//! they are programming errors rather than recoverable results. The variants
//! double as the error type of the few genuinely fallible definition-time
//! paths (schema construction).

use thiserror::Error;

/// Structured error types for record and schema operations.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A schema declared the same field name twice
    #[error("duplicate field '{name}' in schema")]
    DuplicateField { name: String },

    /// `insert` was called for a field the schema already declares
    #[error("field '{name}' is already declared in the schema")]
    AlreadyDeclared { name: String },

    /// An accessor was called for a field the schema does not declare
    #[error("field '{name}' is not declared in the schema")]
    NotDeclared { name: String },

    /// A field was accessed under a type other than its declared type
    #[error("field '{name}' type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// `disjoint_union` was called with schemas sharing a field name
    #[error("schemas overlap on field '{name}'")]
    SchemaOverlap { name: String },

    /// A whole-record conversion was attempted under the wrong schema
    #[error("schema mismatch: expected {expected}, found {actual}")]
    SchemaMismatch { expected: String, actual: String },
}

impl RecordError {
    /// Check if this error was raised while declaring fields or schemas
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            RecordError::DuplicateField { .. }
                | RecordError::AlreadyDeclared { .. }
                | RecordError::NotDeclared { .. }
        )
    }

    /// Check if this error is related to field or schema type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            RecordError::TypeMismatch { .. } | RecordError::SchemaMismatch { .. }
        )
    }

    /// Check if this error is a schema disjointness violation
    pub fn is_overlap_error(&self) -> bool {
        matches!(self, RecordError::SchemaOverlap { .. })
    }

    /// Get the field name if this is a field-specific error
    pub fn field(&self) -> Option<&str> {
        match self {
            RecordError::DuplicateField { name }
            | RecordError::AlreadyDeclared { name }
            | RecordError::NotDeclared { name }
            | RecordError::TypeMismatch { name, .. }
            | RecordError::SchemaOverlap { name } => Some(name),
            _ => None,
        }
    }
}

// Conversion from RecordError to the main Error type
impl From<RecordError> for crate::Error {
    fn from(err: RecordError) -> Self {
        crate::Error::Record(err)
    }
}
