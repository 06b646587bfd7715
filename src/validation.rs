//! Request payload validation.
//!
//! Each operation has a static [`Schema`]: an ordered list of field rules
//! checked against the raw JSON body before anything is deserialized or
//! written. The first violated rule is reported.

use serde_json::{Map, Value};
use thiserror::Error;

/// Constraint on the value of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string of at most `max_len` characters.
    String { max_len: usize },
    /// An integer (fitting `i64`) not smaller than `min`.
    Integer { min: i64 },
    /// The field may only be sent as `null`.
    Null,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    const fn required(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            required: true,
            kind,
        }
    }

    const fn optional(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            required: false,
            kind,
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub const CREATE_USER: Schema = Schema {
    fields: &[
        FieldRule::required("name", FieldKind::String { max_len: 256 }),
        FieldRule::optional("advertisements", FieldKind::Null),
    ],
};

pub const CREATE_ADVERTISEMENT: Schema = Schema {
    fields: &[
        FieldRule::required("title", FieldKind::String { max_len: 64 }),
        FieldRule::optional("description", FieldKind::String { max_len: 256 }),
        FieldRule::required("owner", FieldKind::Integer { min: 0 }),
        FieldRule::optional("created_at", FieldKind::Null),
    ],
};

pub const UPDATE_ADVERTISEMENT: Schema = Schema {
    fields: &[
        FieldRule::optional("title", FieldKind::String { max_len: 64 }),
        FieldRule::optional("description", FieldKind::String { max_len: 256 }),
        FieldRule::optional("owner", FieldKind::Integer { min: 0 }),
    ],
};

/// Human-readable description of the first violated constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check `payload` against `schema`.
pub fn validate(payload: &Value, schema: &Schema) -> Result<(), ValidationError> {
    let object = as_object(payload)?;
    for rule in schema.fields {
        match object.get(rule.field) {
            None if rule.required => {
                return Err(ValidationError::new(format!(
                    "'{}' is a required property",
                    rule.field
                )));
            }
            None => {}
            Some(value) => check_kind(value, rule.kind)?,
        }
    }
    Ok(())
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::new(format!("{} is not of type 'object'", payload)))
}

fn check_kind(value: &Value, kind: FieldKind) -> Result<(), ValidationError> {
    match kind {
        FieldKind::String { max_len } => {
            let s = value
                .as_str()
                .ok_or_else(|| not_of_type(value, "string"))?;
            if s.chars().count() > max_len {
                return Err(ValidationError::new(format!("{} is too long", value)));
            }
        }
        FieldKind::Integer { min } => {
            let n = match value {
                Value::Number(n) if n.is_i64() => n.as_i64(),
                Value::Number(n) if n.is_u64() => {
                    return Err(ValidationError::new(format!(
                        "{} is greater than the maximum of {}",
                        value,
                        i64::MAX
                    )));
                }
                _ => None,
            }
            .ok_or_else(|| not_of_type(value, "integer"))?;
            if n < min {
                return Err(ValidationError::new(format!(
                    "{} is less than the minimum of {}",
                    n, min
                )));
            }
        }
        FieldKind::Null => {
            if !value.is_null() {
                return Err(not_of_type(value, "null"));
            }
        }
    }
    Ok(())
}

fn not_of_type(value: &Value, expected: &str) -> ValidationError {
    ValidationError::new(format!("{} is not of type '{}'", value, expected))
}
