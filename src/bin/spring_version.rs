//! Print the Spring Boot version selected by a version selector and the BOM
//! versions start.spring.io pairs with it.
//!
//! Usage:
//!   spring-version
//!   spring-version -b ">=2.0.0, <4.0.0" -d cloud-starter,devtools -d native
//!   spring-version -o github -v

use anyhow::{Context, Result};
use clap::Parser;
use spring_version::{
    Config, DEFAULT_BOOT_URL, DEFAULT_STARTER_URL, DEFAULT_TYPE_ID, Endpoints, GITHUB_OUTPUT_ENV,
    HttpSource, OutputSink, OutputTarget, resolve,
};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "\
Get the latest Spring Boot version and its associated BOM versions, e.g. Spring Cloud.

Use '-b, --boot-version' to choose the Spring Boot version, or leave it blank
to use the current release. Semantic version ranges are supported:

  $ spring-version
  $ spring-version -b 2.7.15-SNAPSHOT
  $ spring-version -b \">=2.0.0, <4.0.0\"
  $ spring-version -b ~3.x

Repeat '-d, --dependency' or separate ids with commas to add dependencies:

  $ spring-version -d cloud-starter -d native
  $ spring-version -d cloud-starter,devtools -d native

'--starter-url' and '--boot-url' point at other metadata servers:

  $ spring-version --starter-url https://mystarter.com:8080";

#[derive(Parser, Debug)]
#[command(name = "spring-version")]
#[command(about = "Get the latest Spring version", long_about = LONG_ABOUT)]
struct Cli {
    /// URL of Starter metadata.
    #[arg(long, default_value = DEFAULT_STARTER_URL)]
    starter_url: String,
    /// URL of Spring Boot metadata.
    #[arg(long, default_value = DEFAULT_BOOT_URL)]
    boot_url: String,
    /// Allow insecure metadata server connections when using SSL.
    #[arg(short = 'k', long)]
    insecure: bool,
    /// Type ID of the action in the starter metadata.
    #[arg(long, default_value = DEFAULT_TYPE_ID)]
    type_id: String,
    /// Spring Boot version, supports semver comparison.
    #[arg(short = 'b', long, default_value = "")]
    boot_version: String,
    /// Dependency identifiers to include in the generated project.
    #[arg(short = 'd', long = "dependency")]
    dependencies: Vec<String>,
    /// Output destination: stdout or github.
    #[arg(short = 'o', long, default_value = "stdout", value_parser = ["stdout", "github"])]
    output: String,
    /// Also print every build property as one JSON line.
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let output: OutputTarget = self.output.parse()?;
        Ok(Config {
            endpoints: Endpoints {
                starter_url: self.starter_url,
                boot_url: self.boot_url,
                insecure: self.insecure,
            },
            boot_version: self.boot_version,
            type_id: self.type_id,
            dependencies: self.dependencies,
            output,
            verbose: self.verbose,
        })
    }
}

fn main() {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spring_version=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let source = HttpSource::new(config.endpoints.insecure).context("building HTTP client")?;
    let resolution = resolve(&config, &source)?;

    let github_output = env::var_os(GITHUB_OUTPUT_ENV).map(PathBuf::from);
    let mut sink = OutputSink::open(config.output, github_output.as_deref())
        .with_context(|| format!("opening {} output", config.output))?;
    resolution.write(&mut sink, config.verbose)?;
    Ok(())
}
