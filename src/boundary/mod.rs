//! Boundary decoding for the JSON metadata payloads.
//!
//! Payloads are parsed into a `serde_json::Value`, checked against the
//! embedded schema for their kind and only then deserialized into the typed
//! wire structs. Anything that fails on the way is a [`Error::Parse`] naming
//! the payload and the URL it came from.

use crate::error::{Error, Payload, Result};
use crate::schema_loader::PayloadSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

const RELEASES_SCHEMA: &str = include_str!("../../schema/releases.schema.json");
const TYPES_SCHEMA: &str = include_str!("../../schema/types.schema.json");

static RELEASES: OnceLock<Result<PayloadSchema, String>> = OnceLock::new();
static TYPES: OnceLock<Result<PayloadSchema, String>> = OnceLock::new();

/// Compiled schema for `payload`, built on first use.
fn payload_schema(payload: Payload) -> Option<&'static Result<PayloadSchema, String>> {
    let (cell, source) = match payload {
        Payload::Releases => (&RELEASES, RELEASES_SCHEMA),
        Payload::Types => (&TYPES, TYPES_SCHEMA),
        Payload::Descriptor => return None,
    };
    Some(cell.get_or_init(|| PayloadSchema::compile(source)))
}

/// Decode a JSON payload of the given kind fetched from `url`.
pub fn decode_json<T: DeserializeOwned>(payload: Payload, url: &str, body: &str) -> Result<T> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| Error::parse(payload, url, err))?;
    if let Some(compiled) = payload_schema(payload) {
        let schema = compiled
            .as_ref()
            .map_err(|err| Error::parse(payload, url, err))?;
        schema
            .validate(&value)
            .map_err(|err| Error::parse(payload, url, err))?;
    }
    serde_json::from_value(value).map_err(|err| Error::parse(payload, url, err))
}
