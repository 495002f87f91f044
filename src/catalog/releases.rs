use crate::boundary::decode_json;
use crate::error::{Payload, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BootMetadata {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedReleases,
}

#[derive(Debug, Deserialize)]
struct EmbeddedReleases {
    releases: Vec<ReleaseRecord>,
}

#[derive(Debug, Deserialize)]
struct ReleaseRecord {
    version: String,
    #[serde(default)]
    current: bool,
}

/// A published Spring Boot release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release {
    version: String,
    current: bool,
}

impl Release {
    pub fn new(version: impl Into<String>, current: bool) -> Self {
        Self {
            version: version.into(),
            current,
        }
    }

    /// Version string exactly as the server spelled it.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_current(&self) -> bool {
        self.current
    }
}

/// Releases in the order the server listed them. Not assumed sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReleaseCatalog {
    releases: Vec<Release>,
}

impl ReleaseCatalog {
    pub fn new(releases: Vec<Release>) -> Self {
        Self { releases }
    }

    /// Decode the `_embedded.releases` payload served from `url`.
    pub fn from_json(url: &str, body: &str) -> Result<Self> {
        let metadata: BootMetadata = decode_json(Payload::Releases, url, body)?;
        Ok(metadata
            .embedded
            .releases
            .into_iter()
            .map(|record| Release::new(record.version, record.current))
            .collect())
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// First release flagged current, if any.
    pub fn current(&self) -> Option<&Release> {
        self.releases.iter().find(|release| release.current)
    }

    pub fn versions(&self) -> Vec<String> {
        self.releases.iter().map(|r| r.version.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl FromIterator<Release> for ReleaseCatalog {
    fn from_iter<I: IntoIterator<Item = Release>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
