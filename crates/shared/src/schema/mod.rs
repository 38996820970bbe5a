//! Record schemas and the field reader they are built on.
//!
//! Each schema walks its fields in declaration order through a
//! [`FieldReader`], which records a violation for every bad field and keeps
//! going, so one call reports everything wrong with an input.

pub mod profile;
pub mod song;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{FieldViolation, ValidationError, ROOT_PATH};

/// Length of the canonical hyphenated UUID layout (`8-4-4-4-12`).
pub const UUID_HYPHENATED_LEN: usize = 36;

/// A string-backed enum whose accepted values form a closed set.
pub trait ClosedEnum: Sized + Copy {
    /// Every accepted raw value, in display order.
    const ALLOWED: &'static [&'static str];

    /// Parse a raw value; `None` for anything outside [`Self::ALLOWED`].
    fn parse(raw: &str) -> Option<Self>;
}

/// Name of a JSON value's kind, for type mismatch reports.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether `raw` has the 36-character hyphenated UUID shape.
///
/// Any version and variant nibble is accepted, as is either letter case.
/// Simple, braced and URN forms are rejected even though they name a UUID.
pub fn is_uuid(raw: &str) -> bool {
    raw.len() == UUID_HYPHENATED_LEN && Uuid::try_parse(raw).is_ok()
}

/// Reads typed fields out of one JSON object, collecting violations.
pub(crate) struct FieldReader<'a> {
    entity: &'static str,
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    /// Start reading `input`. A non-object input fails immediately with a
    /// single violation on [`ROOT_PATH`]; there are no fields to inspect.
    pub(crate) fn new(entity: &'static str, input: &'a Value) -> Result<Self, ValidationError> {
        match input.as_object() {
            Some(object) => Ok(Self {
                entity,
                object,
                violations: Vec::new(),
            }),
            None => Err(ValidationError::new(
                entity,
                vec![FieldViolation::type_mismatch(
                    ROOT_PATH,
                    "object",
                    json_kind(input),
                )],
            )),
        }
    }

    /// A required string with no further constraint.
    pub(crate) fn string(&mut self, field: &str) -> Option<String> {
        self.present_str(field, "string").map(str::to_owned)
    }

    /// A required string of at least `min` characters.
    pub(crate) fn string_min(&mut self, field: &str, min: usize) -> Option<String> {
        let raw = self.present_str(field, "string")?;
        if raw.chars().count() < min {
            self.violations.push(FieldViolation::format(
                field,
                format!("at least {min} character(s)"),
                format!("{:?}", raw),
            ));
            return None;
        }
        Some(raw.to_owned())
    }

    /// A field that may be absent, `null`, or a string.
    ///
    /// The outer `Option` is `None` only when a violation was recorded.
    pub(crate) fn nullable_string(&mut self, field: &str) -> Option<Option<String>> {
        match self.object.get(field) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.violations.push(FieldViolation::type_mismatch(
                    field,
                    "string or null",
                    json_kind(other),
                ));
                None
            }
        }
    }

    /// A required UUID in hyphenated form.
    pub(crate) fn uuid(&mut self, field: &str) -> Option<Uuid> {
        let raw = self.present_str(field, "uuid string")?;
        if !is_uuid(raw) {
            self.violations.push(FieldViolation::format(
                field,
                "uuid (xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)",
                format!("{:?}", raw),
            ));
            return None;
        }
        Uuid::try_parse(raw).ok()
    }

    /// A required member of the closed set `T`.
    pub(crate) fn one_of<T: ClosedEnum>(&mut self, field: &str) -> Option<T> {
        let raw = self.present_str(field, "string")?;
        match T::parse(raw) {
            Some(value) => Some(value),
            None => {
                self.violations.push(FieldViolation::enumeration(
                    field,
                    T::ALLOWED,
                    format!("{:?}", raw),
                ));
                None
            }
        }
    }

    /// Finish reading, handing back the collected violations.
    pub(crate) fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// Finish reading as a [`ValidationError`] for this reader's entity.
    pub(crate) fn into_error(self) -> ValidationError {
        let entity = self.entity;
        ValidationError::new(entity, self.into_violations())
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Look up a required field that must hold a JSON string.
    fn present_str(&mut self, field: &str, expected: &str) -> Option<&'a str> {
        let object: &'a Map<String, Value> = self.object;
        match object.get(field) {
            None => {
                self.violations.push(FieldViolation::missing(field, expected));
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.violations.push(FieldViolation::type_mismatch(
                    field,
                    expected,
                    json_kind(other),
                ));
                None
            }
        }
    }
}
