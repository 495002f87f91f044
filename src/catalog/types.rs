//! Starter build types and the action used to generate each one.
//!
//! Lookups are a linear scan in server order. Ids are not checked for
//! uniqueness; when the server repeats an id the first entry wins.

use crate::boundary::decode_json;
use crate::error::{Error, Payload, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StarterMetadata {
    #[serde(rename = "type")]
    types: TypeCapability,
}

#[derive(Debug, Deserialize)]
struct TypeCapability {
    #[serde(default)]
    default: Option<String>,
    values: Vec<TypeRecord>,
}

#[derive(Debug, Deserialize)]
struct TypeRecord {
    id: String,
    action: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    pub id: String,
    pub action: String,
}

impl TypeEntry {
    pub fn new(id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    default_id: Option<String>,
    entries: Vec<TypeEntry>,
}

impl TypeCatalog {
    pub fn new(entries: Vec<TypeEntry>) -> Self {
        Self {
            default_id: None,
            entries,
        }
    }

    /// Declare the type selected when callers pass an empty id.
    pub fn with_default(mut self, id: impl Into<String>) -> Self {
        self.default_id = Some(id.into());
        self
    }

    /// Decode the `type` capability of the starter metadata served from `url`.
    pub fn from_json(url: &str, body: &str) -> Result<Self> {
        let metadata: StarterMetadata = decode_json(Payload::Types, url, body)?;
        let entries = metadata
            .types
            .values
            .into_iter()
            .map(|record| TypeEntry::new(record.id, record.action))
            .collect();
        Ok(Self {
            default_id: metadata.types.default.filter(|id| !id.is_empty()),
            entries,
        })
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    /// Action path of the first entry whose id equals `type_id`.
    ///
    /// Matching is exact and case-sensitive. An empty `type_id` looks up the
    /// declared default type.
    pub fn resolve_action(&self, type_id: &str) -> Result<&str> {
        let wanted = match (type_id.is_empty(), self.default_id()) {
            (true, Some(default_id)) => default_id,
            _ => type_id,
        };
        self.entries
            .iter()
            .find(|entry| entry.id == wanted)
            .map(|entry| entry.action.as_str())
            .ok_or_else(|| Error::TypeNotFound {
                type_id: wanted.to_string(),
                available: self.entries.iter().map(|e| e.id.clone()).collect(),
            })
    }
}
