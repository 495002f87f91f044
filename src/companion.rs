//! Companion (BOM) versions read from a generated build descriptor.
//!
//! start.spring.io pins the BOMs it pairs with a Boot release as Maven
//! properties such as `spring-cloud.version`. A property belongs to the first
//! entry of the prefix list that is a plain string prefix of its key. The test
//! is not boundary aware, so `spring-cloud-gcp.version` is attributed to
//! `spring-cloud` when that prefix comes first.

use crate::error::{Error, Payload, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// BOM names known to start.spring.io (`initializr.env.boms`), in match order.
pub const SUPPORTED_BOMS: &[&str] = &[
    "spring-cloud",
    "spring-cloud-azure",
    "spring-cloud-gcp",
    "spring-cloud-services",
    "spring-modulith",
    "spring-shell",
    "codecentric-spring-boot-admin",
    "hilla",
    "sentry",
    "solace-spring-boot",
    "solace-spring-cloud",
    "testcontainers",
    "vaadin",
    "wavefront",
];

/// Build properties in the order the descriptor declares them.
pub type PropertyMap = IndexMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Companion {
    pub prefix: String,
    pub value: String,
}

/// First prefix in `prefixes` that `key` starts with.
pub fn first_matching_prefix<'a, S: AsRef<str>>(key: &str, prefixes: &'a [S]) -> Option<&'a str> {
    prefixes
        .iter()
        .map(|prefix| prefix.as_ref())
        .find(|prefix| key.starts_with(*prefix))
}

/// Companion versions found in `properties`, in property order.
///
/// Keys matching no prefix are skipped; every key yields at most one entry.
pub fn extract_companions<S: AsRef<str>>(properties: &PropertyMap, prefixes: &[S]) -> Vec<Companion> {
    properties
        .iter()
        .filter_map(|(key, value)| {
            first_matching_prefix(key, prefixes).map(|prefix| Companion {
                prefix: prefix.to_string(),
                value: value.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct MavenProject {
    #[serde(default)]
    properties: PropertyMap,
}

/// Properties of a generated Maven build descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildDescriptor {
    properties: PropertyMap,
}

impl BuildDescriptor {
    pub fn new(properties: PropertyMap) -> Self {
        Self { properties }
    }

    /// Decode the `<properties>` section of a POM served from `url`.
    pub fn from_xml(url: &str, body: &str) -> Result<Self> {
        let project: MavenProject = quick_xml::de::from_str(body)
            .map_err(|err| Error::parse(Payload::Descriptor, url, err))?;
        Ok(Self::new(project.properties))
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn into_properties(self) -> PropertyMap {
        self.properties
    }

    pub fn companions<S: AsRef<str>>(&self, prefixes: &[S]) -> Vec<Companion> {
        extract_companions(&self.properties, prefixes)
    }
}
