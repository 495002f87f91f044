//! Result sinks: standard output or the GitHub Actions output file.

use crate::error::{Error, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

/// Environment variable naming the GitHub Actions output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Github,
}

impl OutputTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputTarget::Stdout => "stdout",
            OutputTarget::Github => "github",
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "stdout" => Ok(OutputTarget::Stdout),
            "github" => Ok(OutputTarget::Github),
            other => Err(Error::output(other, "unsupported output type")),
        }
    }
}

/// Line-oriented writer for `key=value` results.
pub struct OutputSink {
    destination: String,
    writer: Box<dyn Write>,
}

impl OutputSink {
    /// Open the sink for `target`.
    ///
    /// The github target appends to `github_output`, creating the file when
    /// needed; it fails when no path is given.
    pub fn open(target: OutputTarget, github_output: Option<&Path>) -> Result<Self> {
        match target {
            OutputTarget::Stdout => Ok(Self::from_writer("stdout", io::stdout())),
            OutputTarget::Github => {
                let path = github_output
                    .filter(|path| !path.as_os_str().is_empty())
                    .ok_or_else(|| {
                        Error::output(
                            "github",
                            format!("environment variable {GITHUB_OUTPUT_ENV} must be set"),
                        )
                    })?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|err| Error::output_file(path, err))?;
                Ok(Self::from_writer(path.display().to_string(), file))
            }
        }
    }

    pub fn from_writer(destination: impl Into<String>, writer: impl Write + 'static) -> Self {
        Self {
            destination: destination.into(),
            writer: Box::new(writer),
        }
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|err| Error::output(&self.destination, err))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|err| Error::output(&self.destination, err))
    }
}
