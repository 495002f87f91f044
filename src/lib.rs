//! Resolve a Spring Boot release and the companion BOM versions start.spring.io
//! generates alongside it.
//!
//! The pipeline is strictly sequential: fetch the release catalog, resolve the
//! version selector, fetch the starter type catalog, resolve the build action,
//! generate a build descriptor and extract companion versions from its
//! properties. Every step returns a typed [`Error`] and the first failure
//! aborts the run.

pub mod boundary;
pub mod catalog;
pub mod companion;
pub mod config;
pub mod connectors;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod version;

mod schema_loader;

pub use catalog::{Release, ReleaseCatalog, TypeCatalog, TypeEntry};
pub use companion::{
    BuildDescriptor, Companion, PropertyMap, SUPPORTED_BOMS, extract_companions,
    first_matching_prefix,
};
pub use config::{Config, DEFAULT_BOOT_URL, DEFAULT_STARTER_URL, DEFAULT_TYPE_ID, Endpoints};
pub use connectors::{ACCEPT_JSON, ACCEPT_XML, HttpSource, MetadataSource};
pub use error::{Error, ErrorKind, Payload, Result};
pub use output::{GITHUB_OUTPUT_ENV, OutputSink, OutputTarget};
pub use pipeline::{Resolution, descriptor_url, resolve};
pub use version::{Constraint, parse_version, resolve_version};

/// Flatten user-supplied dependency ids, some of which may be comma-joined.
///
/// Entries are split on `,`, trimmed and dropped when empty. Order is kept and
/// repeated ids are passed through untouched.
pub fn normalize_dependencies<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
