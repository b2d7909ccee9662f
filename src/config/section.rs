// Configuration section module
// Declares typed sections as explicit field tables

use std::collections::HashMap;

use crate::error::ConfigError;

/// Default value of a declared field; also fixes the field's type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    Bool(bool),
    Int(i64),
}

/// One row of a section's field table: field name, path suffix, default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub path: &'static str,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub const fn string(field: &'static str, path: &'static str, default: &'static str) -> Self {
        Self {
            field,
            path,
            default: FieldDefault::Str(default),
        }
    }

    pub const fn boolean(field: &'static str, path: &'static str, default: bool) -> Self {
        Self {
            field,
            path,
            default: FieldDefault::Bool(default),
        }
    }

    pub const fn integer(field: &'static str, path: &'static str, default: i64) -> Self {
        Self {
            field,
            path,
            default: FieldDefault::Int(default),
        }
    }
}

/// A resolved field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoundField {
    key: String,
    value: FieldValue,
    explicit: bool,
}

/// Field values resolved for one section, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundFields {
    prefix: String,
    fields: HashMap<&'static str, BoundField>,
}

impl BoundFields {
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            fields: HashMap::new(),
        }
    }

    pub(crate) fn insert(
        &mut self,
        field: &'static str,
        key: String,
        value: FieldValue,
        explicit: bool,
    ) {
        self.fields.insert(
            field,
            BoundField {
                key,
                value,
                explicit,
            },
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// Number of fields that came from the source rather than a default
    pub(crate) fn explicit_count(&self) -> usize {
        self.fields.values().filter(|f| f.explicit).count()
    }

    /// Full dotted key a field was read from
    pub fn key(&self, field: &str) -> String {
        self.fields.get(field).map_or_else(
            || format!("{}.{field}", self.prefix),
            |f| f.key.clone(),
        )
    }

    /// String field; empty when undeclared
    pub fn string(&self, field: &str) -> String {
        match self.fields.get(field).map(|f| &f.value) {
            Some(FieldValue::Str(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Boolean field; `false` when undeclared
    pub fn boolean(&self, field: &str) -> bool {
        matches!(
            self.fields.get(field).map(|f| &f.value),
            Some(FieldValue::Bool(true))
        )
    }

    /// Integer field; `0` when undeclared
    pub fn integer(&self, field: &str) -> i64 {
        match self.fields.get(field).map(|f| &f.value) {
            Some(FieldValue::Int(i)) => *i,
            _ => 0,
        }
    }
}

/// A typed, read-only snapshot of one configuration sub-tree
pub trait ConfigSection: Sized {
    /// Prefix the section is bound under by default
    const PREFIX: &'static str;

    /// Field table: every declared field with its path suffix and default
    const FIELDS: &'static [FieldSpec];

    /// Build the section from resolved values.
    ///
    /// Range checks that the field table cannot express fail with
    /// [`ConfigError::Bind`].
    fn from_fields(fields: &BoundFields) -> Result<Self, ConfigError>;
}
