//! End-to-end resolution: release catalog, version, action, descriptor,
//! companions.
//!
//! Each step runs only after the previous one succeeded and the first error is
//! returned as is. Nothing is written while resolving; [`Resolution::write`]
//! renders every line up front so a failed run leaves the sink untouched.

use crate::catalog::{ReleaseCatalog, TypeCatalog};
use crate::companion::{BuildDescriptor, Companion, PropertyMap, SUPPORTED_BOMS};
use crate::config::Config;
use crate::connectors::{ACCEPT_JSON, ACCEPT_XML, MetadataSource, parse_endpoint};
use crate::error::{Error, Result};
use crate::normalize_dependencies;
use crate::output::OutputSink;
use crate::version::resolve_version;
use tracing::{debug, info};
use url::Url;

/// Output key for the resolved Spring Boot version.
pub const BOOT_VERSION_KEY: &str = "spring-boot";
/// Output key for the verbose property dump.
pub const METADATA_KEY: &str = "metadata";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Selected release, spelled as in the catalog.
    pub boot_version: String,
    pub action: String,
    pub dependencies: Vec<String>,
    pub companions: Vec<Companion>,
    pub properties: PropertyMap,
}

impl Resolution {
    /// Render the `key=value` lines for this resolution.
    pub fn lines(&self, verbose: bool) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.companions.len() + 2);
        lines.push(format!("{BOOT_VERSION_KEY}={}", self.boot_version));
        lines.extend(
            self.companions
                .iter()
                .map(|companion| format!("{}={}", companion.prefix, companion.value)),
        );
        if verbose {
            let metadata = serde_json::to_string(&self.properties)
                .map_err(|err| Error::output(METADATA_KEY, err))?;
            lines.push(format!("{METADATA_KEY}={metadata}"));
        }
        Ok(lines)
    }

    pub fn write(&self, sink: &mut OutputSink, verbose: bool) -> Result<()> {
        for line in self.lines(verbose)? {
            sink.write_line(&line)?;
        }
        sink.flush()
    }
}

/// URL asking the starter to generate `action` for `boot_version`.
///
/// `dependencies` is sent comma-joined and omitted when empty.
pub fn descriptor_url(
    starter_url: &str,
    action: &str,
    boot_version: &str,
    dependencies: &[String],
) -> Result<Url> {
    let mut url = parse_endpoint(&format!("{}{}", starter_url.trim_end_matches('/'), action))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("BootVersion", boot_version);
        if !dependencies.is_empty() {
            query.append_pair("dependencies", &dependencies.join(","));
        }
    }
    Ok(url)
}

/// Run the whole resolution against `source`.
pub fn resolve(config: &Config, source: &dyn MetadataSource) -> Result<Resolution> {
    let boot_url = parse_endpoint(&config.endpoints.boot_url)?;
    info!(url = %boot_url, "fetching spring-boot metadata");
    let releases = ReleaseCatalog::from_json(boot_url.as_str(), &source.get(&boot_url, ACCEPT_JSON)?)?;
    debug!(releases = releases.len(), "loaded release catalog");

    let boot_version = resolve_version(&config.boot_version, &releases)?;
    info!(version = %boot_version, "selected spring-boot version");

    let starter_url = parse_endpoint(&config.endpoints.starter_url)?;
    info!(url = %starter_url, "fetching starter metadata");
    let types = TypeCatalog::from_json(starter_url.as_str(), &source.get(&starter_url, ACCEPT_JSON)?)?;
    let action = types.resolve_action(&config.type_id)?.to_string();

    let dependencies = normalize_dependencies(&config.dependencies);
    let url = descriptor_url(&config.endpoints.starter_url, &action, &boot_version, &dependencies)?;
    debug!(url = %url, "generating build descriptor");
    let descriptor = BuildDescriptor::from_xml(url.as_str(), &source.get(&url, ACCEPT_XML)?)?;

    let companions = descriptor.companions(SUPPORTED_BOMS);
    debug!(
        properties = descriptor.properties().len(),
        companions = companions.len(),
        "extracted companion versions"
    );

    Ok(Resolution {
        boot_version,
        action,
        dependencies,
        companions,
        properties: descriptor.into_properties(),
    })
}
