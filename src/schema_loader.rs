//! JSON Schema compilation for the metadata payloads.
//!
//! Schemas ship inside the binary (see `schema/`). They only pin the shape the
//! decoder relies on; extra fields sent by the servers are allowed.

use jsonschema::JSONSchema;
use serde_json::Value;

/// Compiled schema plus the title used in failure messages.
pub(crate) struct PayloadSchema {
    title: String,
    compiled: JSONSchema,
}

impl PayloadSchema {
    /// Parse and compile an embedded schema document.
    pub(crate) fn compile(raw: &str) -> Result<Self, String> {
        let schema: Value =
            serde_json::from_str(raw).map_err(|err| format!("parsing embedded schema: {err}"))?;
        let title = schema
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("payload")
            .to_string();
        let compiled = JSONSchema::compile(&schema)
            .map_err(|err| format!("compiling schema '{title}': {err}"))?;
        Ok(Self { title, compiled })
    }

    /// Validate `instance`, joining every violation into one message.
    pub(crate) fn validate(&self, instance: &Value) -> Result<(), String> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(format!("{} failed schema validation:\n{}", self.title, details));
        }
        Ok(())
    }
}
