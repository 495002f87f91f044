//! Closed set of failures a resolution run can end with.
//!
//! Every variant carries the context needed to diagnose the failure without
//! re-running: the URL that was fetched, the offending string, the constraint
//! that was tried, or the candidates that were considered. Callers branch on
//! [`Error::kind`] instead of matching message text.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Wire payloads crossing the process boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    Releases,
    Types,
    Descriptor,
}

impl Payload {
    pub fn as_str(&self) -> &'static str {
        match self {
            Payload::Releases => "spring-boot release metadata",
            Payload::Types => "starter type metadata",
            Payload::Descriptor => "build descriptor",
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    InvalidVersionFormat,
    InvalidConstraint,
    NoCurrentRelease,
    NoMatchingVersion,
    TypeNotFound,
    Output,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("malformed {payload} from {url}: {message}")]
    Parse {
        payload: Payload,
        url: String,
        message: String,
    },

    #[error("invalid spring-boot version format: {version}: {message}")]
    InvalidVersionFormat { version: String, message: String },

    #[error("invalid spring-boot constraint format: {constraint}: {message}")]
    InvalidConstraint { constraint: String, message: String },

    #[error("can not determine spring-boot version: no release is marked current")]
    NoCurrentRelease,

    #[error(
        "no spring-boot version matching the given constraints [{constraint}]: {}",
        .candidates.join(", ")
    )]
    NoMatchingVersion {
        constraint: String,
        candidates: Vec<String>,
    },

    #[error("can not determine type action for '{type_id}' (available: {})", .available.join(", "))]
    TypeNotFound {
        type_id: String,
        available: Vec<String>,
    },

    #[error("could not write output to {destination}: {message}")]
    Output {
        destination: String,
        message: String,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network { .. } => ErrorKind::Network,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::InvalidVersionFormat { .. } => ErrorKind::InvalidVersionFormat,
            Error::InvalidConstraint { .. } => ErrorKind::InvalidConstraint,
            Error::NoCurrentRelease => ErrorKind::NoCurrentRelease,
            Error::NoMatchingVersion { .. } => ErrorKind::NoMatchingVersion,
            Error::TypeNotFound { .. } => ErrorKind::TypeNotFound,
            Error::Output { .. } => ErrorKind::Output,
        }
    }

    pub(crate) fn network(url: impl fmt::Display, message: impl fmt::Display) -> Self {
        Error::Network {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn parse(payload: Payload, url: impl fmt::Display, message: impl fmt::Display) -> Self {
        Error::Parse {
            payload,
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn output(destination: impl fmt::Display, message: impl fmt::Display) -> Self {
        Error::Output {
            destination: destination.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn output_file(path: &Path, err: std::io::Error) -> Self {
        Error::output(path.display(), err)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
