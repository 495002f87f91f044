#![allow(dead_code)]

// Shared fixtures: canned metadata payloads, an in-process MetadataSource and
// mock metadata endpoints for driving the binary.

use httpmock::{Method::GET, Mock, MockServer};
use spring_version::{Config, Endpoints, Error, MetadataSource};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use url::Url;

pub const BOOT_URL: &str = "https://api.test/projects/spring-boot/releases";
pub const STARTER_URL: &str = "https://start.test";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}

pub fn test_config() -> Config {
    Config {
        endpoints: Endpoints {
            starter_url: STARTER_URL.to_string(),
            boot_url: BOOT_URL.to_string(),
            insecure: false,
        },
        ..Config::default()
    }
}

// Serves bodies keyed by origin + path and remembers every URL requested.
pub struct FakeSource {
    routes: BTreeMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    // Release catalog, starter metadata and POM from tests/fixtures.
    pub fn with_fixtures() -> Self {
        Self::new()
            .route(BOOT_URL, fixture("releases.json"))
            .route(&format!("{STARTER_URL}/"), fixture("starter.json"))
            .route(&format!("{STARTER_URL}/pom.xml"), fixture("pom.xml"))
    }

    pub fn route(mut self, url: &str, body: impl Into<String>) -> Self {
        self.routes.insert(url.to_string(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl MetadataSource for FakeSource {
    fn get(&self, url: &Url, _accept: &str) -> spring_version::Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        let key = format!("{}{}", url.origin().ascii_serialization(), url.path());
        self.routes.get(&key).cloned().ok_or_else(|| Error::Network {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

pub fn mock_releases(server: &MockServer) -> Mock<'_> {
    let body = fixture("releases.json");
    server.mock(|when, then| {
        when.method(GET).path("/releases");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_types(server: &MockServer) -> Mock<'_> {
    let body = fixture("starter.json");
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

// Answers only a descriptor request for `boot_version` and `dependencies`.
pub fn mock_descriptor<'a>(
    server: &'a MockServer,
    boot_version: &str,
    dependencies: Option<&str>,
) -> Mock<'a> {
    let body = fixture("pom.xml");
    server.mock(|when, then| {
        let when = when
            .method(GET)
            .path("/pom.xml")
            .query_param("BootVersion", boot_version);
        if let Some(list) = dependencies {
            when.query_param("dependencies", list);
        }
        then.status(200)
            .header("content-type", "application/xml")
            .body(body);
    })
}
