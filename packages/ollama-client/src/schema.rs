//! Type-safe schema generation for Ollama structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types,
//! then flattens them into the shape Ollama's `format` field accepts.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use ollama_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Claim {
//!     statement: String,
//!     confidence: f32,
//! }
//!
//! // Ready to pass as the `format` field
//! let schema = Claim::ollama_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be decoded via Ollama's structured outputs.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate the JSON schema Ollama expects in the `format` field.
    ///
    /// Ollama takes a plain JSON schema, but grammar compilation handles
    /// `$ref` indirection poorly, so every reference is inlined and the
    /// `definitions`/`$schema` bookkeeping keys are dropped.
    fn ollama_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all `$ref` references by replacing them with the actual schema
/// from the `definitions` section.
fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if ref_path.starts_with("#/definitions/") {
                    let type_name = ref_path.trim_start_matches("#/definitions/");
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        // The inlined definition may itself contain refs
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct TestPremise {
        text: String,
        weight: Option<f32>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct TestClaim {
        statement: String,
        premises: Vec<TestPremise>,
    }

    #[test]
    fn test_schema_is_object() {
        let schema = TestClaim::ollama_schema();
        assert!(schema.is_object());
        assert_eq!(
            schema.get("type"),
            Some(&serde_json::Value::String("object".to_string()))
        );
    }

    #[test]
    fn test_bookkeeping_keys_removed() {
        let schema = TestClaim::ollama_schema();
        let schema_obj = schema.as_object().unwrap();

        assert!(!schema_obj.contains_key("$schema"));
        assert!(!schema_obj.contains_key("definitions"));
    }

    #[test]
    fn test_nested_refs_inlined() {
        let schema = TestClaim::ollama_schema();
        let schema_str = serde_json::to_string(&schema).unwrap();

        // No $ref anywhere once definitions are inlined
        assert!(!schema_str.contains("$ref"), "schema: {}", schema_str);

        // The nested type's fields appear inline under premises.items
        let items = &schema["properties"]["premises"]["items"];
        assert!(items["properties"].get("text").is_some());
        assert!(items["properties"].get("weight").is_some());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(TestClaim::type_name(), "TestClaim");
    }
}
