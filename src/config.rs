//! Run configuration, passed explicitly into [`crate::resolve`].

use crate::output::OutputTarget;

pub const DEFAULT_STARTER_URL: &str = "https://start.spring.io";
pub const DEFAULT_BOOT_URL: &str = "https://api.spring.io/projects/spring-boot/releases";
pub const DEFAULT_TYPE_ID: &str = "maven-build";

/// Where metadata is fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub starter_url: String,
    pub boot_url: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            starter_url: DEFAULT_STARTER_URL.to_string(),
            boot_url: DEFAULT_BOOT_URL.to_string(),
            insecure: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub endpoints: Endpoints,
    /// Version selector; empty means the current release.
    pub boot_version: String,
    pub type_id: String,
    /// Raw dependency ids, possibly comma-joined.
    pub dependencies: Vec<String>,
    pub output: OutputTarget,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            boot_version: String::new(),
            type_id: DEFAULT_TYPE_ID.to_string(),
            dependencies: Vec::new(),
            output: OutputTarget::Stdout,
            verbose: false,
        }
    }
}
