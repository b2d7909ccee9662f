// Configuration binder module
// Resolves a section's field table against a document under a prefix

use super::document::Document;
use super::section::{BoundFields, ConfigSection, FieldDefault, FieldValue};
use crate::error::ConfigError;
use crate::logger;

/// Bind section `S` from `source` under `prefix`.
///
/// Every declared field is read from `<prefix>.<path>`; absent keys and nulls
/// take the field default. A hyphenated path is also looked up with
/// underscores, which is how environment variables spell it, and that
/// spelling wins when present. Binding has no side effects beyond a debug log
/// line, so binding the same source twice yields equal sections.
pub fn bind<S: ConfigSection>(source: &Document, prefix: &str) -> Result<S, ConfigError> {
    validate_prefix(prefix)?;

    let mut fields = BoundFields::new(prefix);
    for spec in S::FIELDS {
        let (key, value, explicit) = resolve_field(source, prefix, spec.path, spec.default)?;
        fields.insert(spec.field, key, value, explicit);
    }

    let section = S::from_fields(&fields)?;
    logger::log_section_bound(prefix, fields.len(), fields.explicit_count());
    Ok(section)
}

/// Bind section `S` under its own default prefix
pub fn bind_section<S: ConfigSection>(source: &Document) -> Result<S, ConfigError> {
    bind(source, S::PREFIX)
}

fn resolve_field(
    source: &Document,
    prefix: &str,
    path: &str,
    default: FieldDefault,
) -> Result<(String, FieldValue, bool), ConfigError> {
    if path.contains('-') {
        let key = format!("{prefix}.{}", path.replace('-', "_"));
        let (value, explicit) = resolve(source, &key, default)?;
        if explicit {
            return Ok((key, value, explicit));
        }
    }

    let key = format!("{prefix}.{path}");
    let (value, explicit) = resolve(source, &key, default)?;
    Ok((key, value, explicit))
}

fn resolve(
    source: &Document,
    key: &str,
    default: FieldDefault,
) -> Result<(FieldValue, bool), ConfigError> {
    let resolved = match default {
        FieldDefault::Str(d) => source.lookup::<String>(key).map(|v| {
            let explicit = v.is_some();
            (FieldValue::Str(v.unwrap_or_else(|| d.to_string())), explicit)
        }),
        FieldDefault::Bool(d) => source
            .lookup::<bool>(key)
            .map(|v| (FieldValue::Bool(v.unwrap_or(d)), v.is_some())),
        FieldDefault::Int(d) => source
            .lookup::<i64>(key)
            .map(|v| (FieldValue::Int(v.unwrap_or(d)), v.is_some())),
    };
    resolved.map_err(|e| ConfigError::bind(key, e))
}

/// A prefix is one or more non-empty segments of `[A-Za-z0-9_-]` joined by dots
fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    let valid = !prefix.is_empty()
        && prefix.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrefix(prefix.to_string()))
    }
}
