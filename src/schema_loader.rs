//! JSON Schema loading for catalog documents.
//!
//! The catalog schema ships embedded in the crate; a copy placed next to an
//! on-disk catalog takes precedence. Either way the schema's `schema_version`
//! const is checked against the allowed set before compilation, and callers
//! validate raw JSON through `validate_value` before deserializing.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Catalog schema compiled into the binary.
pub(crate) const EMBEDDED_CATALOG_SCHEMA: &str =
    include_str!("../schema/labs_catalog.schema.json");

/// File name looked up beside an on-disk catalog.
pub(crate) const CATALOG_SCHEMA_FILE: &str = "labs_catalog.schema.json";

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Where the schema payload comes from.
pub(crate) enum SchemaSource<'a> {
    Embedded,
    File(&'a Path),
}

impl SchemaSource<'_> {
    fn describe(&self) -> String {
        match self {
            SchemaSource::Embedded => "embedded catalog schema".to_string(),
            SchemaSource::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<Value> {
        match self {
            SchemaSource::Embedded => serde_json::from_str(EMBEDDED_CATALOG_SCHEMA)
                .context("parsing embedded catalog schema"),
            SchemaSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening schema {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing schema {}", path.display()))
            }
        }
    }
}

/// Controls how the schema_version const is located and checked.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl Default for SchemaLoadOptions<'_> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            allowed_versions: None,
        }
    }
}

pub(crate) fn load_json_schema(
    source: SchemaSource<'_>,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let origin = source.describe();
    let schema_value = source.read()?;

    let schema_version = extract_schema_version(&schema_value, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema {origin} missing schema_version const"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled = JSONSchema::compile(&schema_value)
        .map_err(|err| anyhow!("compiling schema {origin}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `value` against a compiled schema, joining every violation.
pub(crate) fn validate_value(schema: &JSONSchema, value: &Value, origin: &str) -> Result<()> {
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("labs catalog {origin} failed schema validation:\n{details}");
    }
    Ok(())
}

/// Schema version baked into the embedded schema.
pub(crate) fn embedded_schema_version() -> Option<String> {
    let value: Value = serde_json::from_str(EMBEDDED_CATALOG_SCHEMA).ok()?;
    extract_schema_version(&value, SchemaLoadOptions::default().schema_version_pointer)
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn embedded_schema_compiles_with_expected_version() {
        let loaded = load_json_schema(SchemaSource::Embedded, SchemaLoadOptions::default())
            .expect("embedded schema");
        assert_eq!(loaded.schema_version, "labs_catalog_v1");
        assert_eq!(embedded_schema_version().as_deref(), Some("labs_catalog_v1"));
    }

    #[test]
    fn disallowed_version_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({
                "type": "object",
                "properties": {"schema_version": {"const": "labs_catalog_v9"}}
            })
        )
        .unwrap();
        let allowed = BTreeSet::from(["labs_catalog_v1".to_string()]);
        let err = load_json_schema(
            SchemaSource::File(file.path()),
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
                ..Default::default()
            },
        )
        .err()
        .expect("version outside allowed set");
        assert!(err.to_string().contains("labs_catalog_v9"));
    }

    #[test]
    fn schema_without_version_const_fails() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json!({"type": "object"})).unwrap();
        let err = load_json_schema(SchemaSource::File(file.path()), SchemaLoadOptions::default())
            .err()
            .expect("missing const");
        assert!(err.to_string().contains("missing schema_version const"));
    }

    #[test]
    fn validation_errors_are_reported_together() {
        let loaded =
            load_json_schema(SchemaSource::Embedded, SchemaLoadOptions::default()).unwrap();
        let bad = json!({"schema_version": "labs_catalog_v1", "title": 5, "topics": "none", "extra": true});
        let err = validate_value(&loaded.compiled, &bad, "fixture").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed schema validation"));
        assert!(message.lines().count() >= 3, "{message}");
    }

    #[test]
    fn empty_topic_list_is_schema_valid() {
        let loaded =
            load_json_schema(SchemaSource::Embedded, SchemaLoadOptions::default()).unwrap();
        let empty = json!({"schema_version": "labs_catalog_v1", "title": "Empty", "topics": []});
        validate_value(&loaded.compiled, &empty, "fixture").unwrap();
    }

    #[test]
    fn embedded_schema_has_no_relative_id() {
        let schema: serde_json::Value = serde_json::from_str(EMBEDDED_CATALOG_SCHEMA).unwrap();
        assert!(schema.get("$id").is_none());
    }
}
