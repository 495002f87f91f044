//! Version selectors and release resolution.
//!
//! A selector is either empty (use the release marked current), a single
//! version (`3.1.0`, `2.7.15-SNAPSHOT`, `3.1`) or a range expression
//! (`>=2.0.0, <4.0.0`, `>=2.0.0 <4.0.0`, `~3.x`, `3.0 - 3.2 || ^2.7`).
//! Comparators are joined by commas or whitespace (AND) and alternatives by
//! `||` (OR). A pre-release version only satisfies a comparator that names a
//! pre-release itself; such a comparator admits any pre-release in its range.
//! Catalog versions are parsed leniently (optional `v`, missing minor/patch
//! default to zero, leading zeros allowed) but a catalog entry that still does
//! not parse fails the whole resolution.

use crate::catalog::ReleaseCatalog;
use crate::error::{Error, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

// Two-character spellings first so `>=` is not read as `>`.
const OPERATORS: [(&str, Op); 11] = [
    ("!=", Op::NotEqual),
    (">=", Op::GreaterEq),
    ("=>", Op::GreaterEq),
    ("<=", Op::LessEq),
    ("=<", Op::LessEq),
    ("~>", Op::Tilde),
    (">", Op::Greater),
    ("<", Op::Less),
    ("=", Op::Exact),
    ("~", Op::Tilde),
    ("^", Op::Caret),
];
const OPERATOR_CHARS: &[char] = &['!', '=', '<', '>', '~', '^'];
const WILDCARDS: [&str; 3] = ["x", "X", "*"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Exact,
    NotEqual,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Tilde,
    Caret,
}

/// One comparison against a version written with `precision` numeric
/// components (1 to 3); missing components are zero in `version`.
#[derive(Clone, Debug)]
struct Comparator {
    op: Op,
    version: Version,
    precision: usize,
}

impl Comparator {
    fn any() -> Self {
        Self {
            op: Op::GreaterEq,
            version: Version::new(0, 0, 0),
            precision: 3,
        }
    }

    fn matches(&self, candidate: &Version) -> bool {
        if !candidate.pre.is_empty() && self.version.pre.is_empty() {
            return false;
        }
        let order = precedence(candidate, &self.version);
        match self.op {
            Op::Exact => self.covers(candidate),
            Op::NotEqual => !self.covers(candidate),
            Op::Greater if self.precision < 3 => triple(candidate) >= self.ceiling(self.precision),
            Op::Greater => order == Ordering::Greater,
            Op::GreaterEq => order != Ordering::Less,
            Op::Less => order == Ordering::Less,
            Op::LessEq if self.precision < 3 => triple(candidate) < self.ceiling(self.precision),
            Op::LessEq => order != Ordering::Greater,
            Op::Tilde => {
                order != Ordering::Less && triple(candidate) < self.ceiling(self.precision.min(2))
            }
            Op::Caret => order != Ordering::Less && triple(candidate) < self.ceiling(self.caret_level()),
        }
    }

    // `3.1` covers every 3.1.x; a full version covers itself only.
    fn covers(&self, candidate: &Version) -> bool {
        let order = precedence(candidate, &self.version);
        if self.precision < 3 {
            order != Ordering::Less && triple(candidate) < self.ceiling(self.precision)
        } else {
            order == Ordering::Equal
        }
    }

    /// Exclusive upper bound after bumping the component at `level`.
    ///
    /// Compared on the numeric triple only, so pre-releases of the bound are
    /// excluded too.
    fn ceiling(&self, level: usize) -> (u64, u64, u64) {
        let v = &self.version;
        match level {
            1 => (v.major.saturating_add(1), 0, 0),
            2 => (v.major, v.minor.saturating_add(1), 0),
            _ => (v.major, v.minor, v.patch.saturating_add(1)),
        }
    }

    // Left-most non-zero component stays fixed.
    fn caret_level(&self) -> usize {
        let v = &self.version;
        if v.major > 0 || self.precision == 1 {
            1
        } else if v.minor > 0 || self.precision == 2 {
            2
        } else {
            3
        }
    }
}

fn triple(v: &Version) -> (u64, u64, u64) {
    (v.major, v.minor, v.patch)
}

/// Parsed selector expression. Immutable once built.
#[derive(Clone, Debug)]
pub struct Constraint {
    expression: String,
    alternatives: Vec<Vec<Comparator>>,
}

impl Constraint {
    pub fn parse(expression: &str) -> Result<Self> {
        let trimmed = expression.trim();
        let invalid = |message: String| Error::InvalidConstraint {
            constraint: trimmed.to_string(),
            message,
        };
        if trimmed.is_empty() {
            return Err(invalid("empty constraint".to_string()));
        }

        let alternatives = trimmed
            .split("||")
            .map(parse_alternative)
            .collect::<Result<Vec<_>, String>>()
            .map_err(invalid)?;
        Ok(Self {
            expression: trimmed.to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|group| group.iter().all(|comparator| comparator.matches(version)))
    }

    /// The selector text this constraint was parsed from.
    pub fn as_str(&self) -> &str {
        &self.expression
    }
}

impl FromStr for Constraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Constraint::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Comparators of one `||` alternative, AND-combined.
///
/// Commas and whitespace both separate comparators. An operator written apart
/// from its version (`>= 3.0`) is joined back, and `A - B` is an inclusive
/// range.
fn parse_alternative(alternative: &str) -> Result<Vec<Comparator>, String> {
    let alternative = alternative.trim();
    let mut comparators = Vec::new();
    for group in alternative.split(',') {
        let words: Vec<&str> = group.split_whitespace().collect();
        if words.is_empty() {
            return Err(format!("empty comparator in '{alternative}'"));
        }
        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            if word.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
                let version = words
                    .get(i + 1)
                    .ok_or_else(|| format!("comparator '{word}' has no version"))?;
                comparators.push(parse_comparator(&format!("{word}{version}"))?);
                i += 2;
            } else if words.get(i + 1) == Some(&"-") {
                let upper = words
                    .get(i + 2)
                    .ok_or_else(|| format!("range starting at '{word}' has no upper bound"))?;
                comparators.push(parse_comparator(&format!(">={word}"))?);
                comparators.push(parse_comparator(&format!("<={upper}"))?);
                i += 3;
            } else {
                comparators.push(parse_comparator(word)?);
                i += 1;
            }
        }
    }
    Ok(comparators)
}

/// Parse one comparator such as `>=3.1`, `~>2.7.0`, `!=3.0.0` or `3.x`.
///
/// A bare version is an exact match, trailing wildcard components are
/// dropped (`~3.x` is `~3`) and a leading `v` is ignored.
fn parse_comparator(raw: &str) -> Result<Comparator, String> {
    let (op, body) = OPERATORS
        .iter()
        .find_map(|(token, op)| raw.strip_prefix(*token).map(|rest| (*op, rest)))
        .unwrap_or((Op::Exact, raw));
    let body = body.strip_prefix(['v', 'V']).unwrap_or(body);
    if body.is_empty() {
        return Err(format!("comparator '{raw}' has no version"));
    }

    let mut spelling = Spelling::split(body);
    if !spelling.has_suffix() {
        while spelling.numbers.last().is_some_and(|p| WILDCARDS.contains(p)) {
            spelling.numbers.pop();
        }
    }
    if spelling.numbers.is_empty() {
        return match op {
            Op::Exact | Op::GreaterEq => Ok(Comparator::any()),
            _ => Err(format!("comparator '{raw}' cannot take a bare wildcard")),
        };
    }

    let precision = if spelling.has_suffix() {
        3
    } else {
        spelling.numbers.len()
    };
    Ok(Comparator {
        op,
        version: spelling.to_version()?,
        precision,
    })
}

/// A version as written: numeric components plus the raw suffixes.
struct Spelling<'a> {
    numbers: Vec<&'a str>,
    pre: Option<&'a str>,
    build: Option<&'a str>,
}

impl<'a> Spelling<'a> {
    fn split(body: &'a str) -> Self {
        let (rest, build) = match body.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (body, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };
        Self {
            numbers: core.split('.').collect(),
            pre,
            build,
        }
    }

    fn has_suffix(&self) -> bool {
        self.pre.is_some() || self.build.is_some()
    }

    /// Assemble a version, padding missing minor or patch with zero.
    fn to_version(&self) -> Result<Version, String> {
        if self.numbers.len() > 3 {
            return Err(format!(
                "expected at most three numeric components, found {}",
                self.numbers.len()
            ));
        }
        let mut components = [0u64; 3];
        for (slot, part) in components.iter_mut().zip(&self.numbers) {
            *slot = part
                .parse()
                .map_err(|_| format!("invalid numeric component '{part}'"))?;
        }

        let mut version = Version::new(components[0], components[1], components[2]);
        if let Some(pre) = self.pre {
            if pre.is_empty() {
                return Err("empty pre-release".to_string());
            }
            version.pre = Prerelease::new(pre).map_err(|err| err.to_string())?;
        }
        if let Some(build) = self.build {
            if build.is_empty() {
                return Err("empty build metadata".to_string());
            }
            version.build = BuildMetadata::new(build).map_err(|err| err.to_string())?;
        }
        Ok(version)
    }
}

/// Parse a catalog version string.
///
/// Accepts an optional leading `v`, leading zeros in numeric components and a
/// missing minor or patch component (filled in with zero). The suffixes must
/// be valid semver.
pub fn parse_version(raw: &str) -> Result<Version> {
    let body = raw.strip_prefix(['v', 'V']).unwrap_or(raw);
    Spelling::split(body)
        .to_version()
        .map_err(|message| Error::InvalidVersionFormat {
            version: raw.to_string(),
            message,
        })
}

// Build metadata does not take part in precedence.
fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// Pick the highest catalog release that satisfies `selector`.
///
/// An empty selector means the release flagged current. The returned string is
/// the catalog's own spelling of the version, never a re-rendered one.
pub fn resolve_version(selector: &str, catalog: &ReleaseCatalog) -> Result<String> {
    let selector = selector.trim();
    let expression = if selector.is_empty() {
        let current = catalog.current().ok_or(Error::NoCurrentRelease)?;
        info!(version = current.version(), "no version selector given, using the current release");
        current.version()
    } else {
        selector
    };
    let constraint = Constraint::parse(expression)?;

    let parsed = catalog
        .releases()
        .iter()
        .map(|release| parse_version(release.version()).map(|v| (release.version(), v)))
        .collect::<Result<Vec<_>>>()?;
    debug!(candidates = parsed.len(), constraint = %constraint, "evaluating release catalog");

    let mut selected: Option<(&str, &Version)> = None;
    for (original, version) in &parsed {
        if !constraint.matches(version) {
            continue;
        }
        match selected {
            Some((_, best)) if precedence(version, best) != Ordering::Greater => {}
            _ => selected = Some((*original, version)),
        }
    }

    match selected {
        Some((original, _)) => Ok(original.to_string()),
        None => Err(Error::NoMatchingVersion {
            constraint: constraint.to_string(),
            candidates: catalog.versions(),
        }),
    }
}
