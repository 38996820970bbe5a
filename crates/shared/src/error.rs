//! Validation failure taxonomy.
//!
//! A [`ValidationError`] carries every [`FieldViolation`] found in one input,
//! never just the first. Callers map violations to per-field messages; this
//! crate only describes what went wrong and where.

use std::fmt;

use serde::Serialize;
use ts_rs::TS;

/// Path reported when the input itself is not an object.
pub const ROOT_PATH: &str = "$root";

/// What kind of constraint a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ViolationKind {
    /// A required field is absent.
    MissingField,
    /// The value is of the wrong JSON kind (including `null` on a required field).
    TypeMismatch,
    /// A string failed a format constraint (UUID shape, minimum length).
    FormatViolation,
    /// The value is not a member of its closed set.
    EnumViolation,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TypeMismatch => "type_mismatch",
            Self::FormatViolation => "format_violation",
            Self::EnumViolation => "enum_violation",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FieldViolation {
    /// Field path, e.g. `title`, or [`ROOT_PATH`] for the input itself.
    pub field: String,
    pub kind: ViolationKind,
    /// Human-readable description of what the schema wanted.
    pub expected: String,
    /// What was actually found. `None` when the field was absent.
    pub received: Option<String>,
}

impl FieldViolation {
    pub fn missing(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::MissingField,
            expected: expected.into(),
            received: None,
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::TypeMismatch,
            expected: expected.into(),
            received: Some(received.into()),
        }
    }

    pub fn format(
        field: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::FormatViolation,
            expected: expected.into(),
            received: Some(received.into()),
        }
    }

    pub fn enumeration(
        field: impl Into<String>,
        allowed: &[&str],
        received: impl Into<String>,
    ) -> Self {
        let expected = allowed
            .iter()
            .map(|v| format!("'{v}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        Self {
            field: field.into(),
            kind: ViolationKind::EnumViolation,
            expected: format!("one of {expected}"),
            received: Some(received.into()),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.received {
            Some(received) => write!(
                f,
                "field '{}' ({}): expected {}, got {}",
                self.field, self.kind, self.expected, received
            ),
            None => write!(
                f,
                "field '{}' ({}): expected {}",
                self.field, self.kind, self.expected
            ),
        }
    }
}

/// Every violation found while validating one input against one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, thiserror::Error)]
#[error("{entity} failed validation: {}", summarize(.violations))]
#[ts(export)]
pub struct ValidationError {
    /// Schema name, e.g. `profile` or `song`.
    pub entity: String,
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(entity: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self {
            entity: entity.into(),
            violations,
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Field paths with at least one violation, in report order, deduplicated.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::with_capacity(self.violations.len());
        for v in &self.violations {
            if !fields.contains(&v.field.as_str()) {
                fields.push(&v.field);
            }
        }
        fields
    }

    /// Whether `field` was reported with the given kind.
    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }

    /// Violations reported for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }
}
