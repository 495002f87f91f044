//! Transport used to fetch metadata and generated descriptors.
//!
//! The pipeline only talks to the [`MetadataSource`] trait so tests can swap
//! the network for canned payloads. [`HttpSource`] is the real connector: one
//! blocking GET per call, no retries and no timeout beyond reqwest's defaults.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use url::Url;

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_XML: &str = "application/xml, text/xml;q=0.9, */*;q=0.8";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub trait MetadataSource {
    /// GET `url` and return the response body as text.
    fn get(&self, url: &Url, accept: &str) -> Result<String>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a client; `insecure` skips TLS certificate verification.
    pub fn new(insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|err| Error::network("(client setup)", err))?;
        Ok(Self { client })
    }
}

impl MetadataSource for HttpSource {
    fn get(&self, url: &Url, accept: &str) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, accept)
            .send()
            .map_err(|err| Error::network(url, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(url, format!("server answered {status}")));
        }
        response.text().map_err(|err| Error::network(url, err))
    }
}

/// Parse a configured endpoint.
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|err| Error::network(raw, format!("invalid URL: {err}")))
}
