//! Metadata catalogs fetched at the start of a run.
//!
//! `ReleaseCatalog` holds the Spring Boot releases in server order and
//! `TypeCatalog` the starter's build types with their generation actions.
//! Both are built once from their wire payloads and only read afterwards.

pub mod releases;
pub mod types;

pub use releases::{Release, ReleaseCatalog};
pub use types::{TypeCatalog, TypeEntry};
