//! Scenario JSON Schema (draft-07), embedded at compile time.
//!
//! Validation runs on the raw `Value` before typed deserialization so that
//! shape errors are reported with a JSON pointer instead of a serde message.

use serde_json::Value;

use crate::IoError;

/// The embedded scenario schema text.
pub const SCENARIO_SCHEMA: &str = include_str!("../schemas/scenario.schema.json");

/// Parsed scenario schema.
pub fn scenario_schema() -> Result<Value, IoError> {
    Ok(serde_json::from_str(SCENARIO_SCHEMA)?)
}

/// Validate a scenario document. All violations are reported, one per line,
/// as `<pointer>: <message>`, in the validator's order.
#[cfg(feature = "schemaval")]
pub fn validate_scenario_value(instance: &Value) -> Result<(), IoError> {
    use jsonschema::{Draft, JSONSchema};

    let schema = scenario_schema()?;
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|e| IoError::Schema(format!("schema compile: {e}")))?;

    if let Err(errors) = compiled.validate(instance) {
        let lines: Vec<String> = errors
            .map(|e| {
                let ptr = e.instance_path.to_string();
                format!("{}: {}", if ptr.is_empty() { "/" } else { ptr.as_str() }, e)
            })
            .collect();
        return Err(IoError::Schema(lines.join("\n")));
    }
    Ok(())
}

#[cfg(not(feature = "schemaval"))]
pub fn validate_scenario_value(_instance: &Value) -> Result<(), IoError> {
    tracing::debug!("schema validation disabled at build time");
    Ok(())
}
