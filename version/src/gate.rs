//! Range evaluation for version gates.
//!
//! Ranges use npm syntax: space-separated comparators are ANDed, `||`
//! separates alternatives, `a - b` is an inclusive hyphen range, `x` and `*`
//! are wildcards, and a bare version means exactly that version. Pre-release
//! versions take part in ordinary ordering, so `4.0.0-a` satisfies `>=3.0.0`.

use crate::{parse_version, VersionError, VersionResult};
use regex_lite::Regex;
use semver::{BuildMetadata, Comparator, Op, Prerelease, Version};
use std::ops::{Bound, RangeBounds};
use std::sync::LazyLock;
use tracing::warn;

/// Range matching data standard 3.0 and above.
pub const V3_OR_GREATER: &str = ">=3.0.0";
/// Range matching data standard 5.0 and above.
pub const V5_OR_GREATER: &str = ">=5.0.0";
/// Range matching data standard 7.0 and above.
pub const V7_OR_GREATER: &str = ">=7.0.0";

/// Check a concrete version against a range.
///
/// An unparsable range satisfies nothing; the problem is logged.
pub fn version_satisfies(version: &Version, range: &str) -> bool {
    match VersionRange::parse(range) {
        Ok(parsed) => parsed.matches(version),
        Err(error) => {
            warn!(range = %range, error = %error, "ignoring unparsable version range");
            false
        }
    }
}

type Pattern = LazyLock<Result<Regex, regex_lite::Error>>;

static HYPHEN_RANGE: Pattern = LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(\S+)$"));
static OPERATOR_SPACING: Pattern = LazyLock::new(|| Regex::new(r"(<=|>=|<|>|=|~|\^)\s+"));

fn compiled(pattern: &'static Pattern) -> VersionResult<&'static Regex> {
    pattern.as_ref().map_err(|e| VersionError::from(e.clone()))
}

/// A parsed range: alternatives of ANDed bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    alternatives: Vec<Vec<Interval>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Interval {
    lower: Bound<Version>,
    upper: Bound<Version>,
}

impl Interval {
    fn everything() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    fn contains(&self, version: &Version) -> bool {
        (self.lower.as_ref(), self.upper.as_ref()).contains(version)
    }
}

impl VersionRange {
    /// Parse an npm-style range.
    pub fn parse(range: &str) -> VersionResult<Self> {
        let mut alternatives = Vec::new();
        for alternative in range.split("||") {
            let normalized = normalize_alternative(alternative.trim())?;
            let mut intervals = Vec::new();
            for token in normalized.split_whitespace() {
                intervals.push(parse_comparator(token)?);
            }
            if intervals.is_empty() {
                intervals.push(Interval::everything());
            }
            alternatives.push(intervals);
        }
        Ok(Self { alternatives })
    }

    /// Check a version against the range.
    pub fn matches(&self, version: &Version) -> bool {
        let version = Version {
            build: BuildMetadata::EMPTY,
            ..version.clone()
        };
        self.alternatives
            .iter()
            .any(|intervals| intervals.iter().all(|interval| interval.contains(&version)))
    }
}

/// Rewrite hyphen ranges and detach operators from their spacing.
fn normalize_alternative(alternative: &str) -> VersionResult<String> {
    if let Some(captures) = compiled(&HYPHEN_RANGE)?.captures(alternative) {
        let from = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let to = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        if from.starts_with(is_operator) || to.starts_with(is_operator) {
            return Err(VersionError::invalid_range(alternative, "operator inside hyphen range"));
        }
        return Ok(format!(">={} <={}", from, to));
    }
    Ok(compiled(&OPERATOR_SPACING)?.replace_all(alternative, "$1").into_owned())
}

fn is_operator(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '~' | '^')
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

fn parse_comparator(token: &str) -> VersionResult<Interval> {
    let token = token.strip_prefix('v').unwrap_or(token);
    if is_wildcard(token) {
        return Ok(Interval::everything());
    }
    // A bare version is exact in npm ranges, caret in Cargo's.
    let has_wildcard = token.split('.').any(is_wildcard);
    let token = if token.starts_with(|c: char| c.is_ascii_digit()) && !has_wildcard {
        format!("={}", token)
    } else {
        token.to_string()
    };
    let comparator = Comparator::parse(&token)
        .map_err(|e| VersionError::invalid_range(&token, e.to_string()))?;
    Ok(interval_for(&comparator))
}

/// Lowest version with the given numbers, below every pre-release of it.
fn floor(major: u64, minor: u64, patch: u64) -> Version {
    Version {
        major,
        minor,
        patch,
        pre: Prerelease::new("0").unwrap_or(Prerelease::EMPTY),
        build: BuildMetadata::EMPTY,
    }
}

fn exact(comparator: &Comparator, patch: u64) -> Version {
    Version {
        major: comparator.major,
        minor: comparator.minor.unwrap_or(0),
        patch,
        pre: comparator.pre.clone(),
        build: BuildMetadata::EMPTY,
    }
}

/// The half-open span `[floor(partial), floor(next partial))` covered by a partial version.
fn partial_span(comparator: &Comparator) -> (Version, Version) {
    let major = comparator.major;
    match comparator.minor {
        None => (floor(major, 0, 0), floor(major + 1, 0, 0)),
        Some(minor) => (floor(major, minor, 0), floor(major, minor + 1, 0)),
    }
}

fn interval_for(comparator: &Comparator) -> Interval {
    use Bound::{Excluded, Included, Unbounded};

    let full = comparator.minor.is_some() && comparator.patch.is_some();
    let (lower, upper) = match comparator.op {
        Op::Exact | Op::Wildcard if full => {
            let v = exact(comparator, comparator.patch.unwrap_or(0));
            (Included(v.clone()), Included(v))
        }
        Op::Exact | Op::Wildcard => {
            let (low, high) = partial_span(comparator);
            (Included(low), Excluded(high))
        }
        Op::Greater if full => (
            Excluded(exact(comparator, comparator.patch.unwrap_or(0))),
            Unbounded,
        ),
        Op::Greater => (Included(partial_span(comparator).1), Unbounded),
        Op::GreaterEq if full => (
            Included(exact(comparator, comparator.patch.unwrap_or(0))),
            Unbounded,
        ),
        Op::GreaterEq => (Included(partial_span(comparator).0), Unbounded),
        Op::Less if full => (
            Unbounded,
            Excluded(exact(comparator, comparator.patch.unwrap_or(0))),
        ),
        Op::Less => (Unbounded, Excluded(partial_span(comparator).0)),
        Op::LessEq if full => (
            Unbounded,
            Included(exact(comparator, comparator.patch.unwrap_or(0))),
        ),
        Op::LessEq => (Unbounded, Excluded(partial_span(comparator).1)),
        Op::Tilde => {
            let major = comparator.major;
            let upper = match comparator.minor {
                Some(minor) => floor(major, minor + 1, 0),
                None => floor(major + 1, 0, 0),
            };
            let lower = if full {
                exact(comparator, comparator.patch.unwrap_or(0))
            } else {
                partial_span(comparator).0
            };
            (Included(lower), Excluded(upper))
        }
        Op::Caret => {
            let major = comparator.major;
            let minor = comparator.minor.unwrap_or(0);
            let upper = match (major, comparator.minor, comparator.patch) {
                (0, Some(0), Some(patch)) => floor(0, 0, patch + 1),
                (0, Some(minor), _) => floor(0, minor + 1, 0),
                (0, None, _) => floor(1, 0, 0),
                _ => floor(major + 1, 0, 0),
            };
            let lower = if full {
                exact(comparator, comparator.patch.unwrap_or(0))
            } else {
                floor(major, minor, 0)
            };
            (Included(lower), Excluded(upper))
        }
        _ => (Unbounded, Unbounded),
    };
    Interval { lower, upper }
}

/// Parse a version, returning an error rather than logging.
pub fn try_version_satisfies(version: &str, range: &str) -> VersionResult<bool> {
    let version = parse_version(version)?;
    Ok(VersionRange::parse(range)?.matches(&version))
}
