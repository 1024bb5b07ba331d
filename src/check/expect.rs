//! Response expectations.
//!
//! An [`Expectation`] asserts something about the latest response: an exact
//! status code, membership in a named status class, or a pattern occurring
//! somewhere in the body. Sets of expectations are evaluated in order with
//! affirm/negate polarity, stopping at the first value that disagrees.

use std::ops::RangeInclusive;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::client::Response;

/// Named status-code range usable in expectations.
///
/// Ranges are inclusive on both ends. `Ok` (200-399) is deliberately broader
/// than `Success` (200-299): a check that follows redirects to completion
/// usually accepts either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 100-199
    Info,
    /// 200-399
    Ok,
    /// 200-299
    Success,
    /// 300-399
    Redirect,
    /// 400-599
    Error,
    /// 400-499
    ClientError,
    /// 500-599
    ServerError,
}

impl StatusClass {
    /// The inclusive code range this class covers.
    pub fn range(self) -> RangeInclusive<u16> {
        match self {
            StatusClass::Info => 100..=199,
            StatusClass::Ok => 200..=399,
            StatusClass::Success => 200..=299,
            StatusClass::Redirect => 300..=399,
            StatusClass::Error => 400..=599,
            StatusClass::ClientError => 400..=499,
            StatusClass::ServerError => 500..=599,
        }
    }

    /// Whether `code` falls inside this class.
    pub fn contains(self, code: u16) -> bool {
        self.range().contains(&code)
    }

    /// Class name as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Info => "info",
            StatusClass::Ok => "ok",
            StatusClass::Success => "success",
            StatusClass::Redirect => "redirect",
            StatusClass::Error => "error",
            StatusClass::ClientError => "client_error",
            StatusClass::ServerError => "server_error",
        }
    }
}

impl FromStr for StatusClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "ok" => Ok(Self::Ok),
            "success" => Ok(Self::Success),
            "redirect" => Ok(Self::Redirect),
            "error" => Ok(Self::Error),
            "client_error" => Ok(Self::ClientError),
            "server_error" => Ok(Self::ServerError),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assertion about the latest response.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Status code equals this value exactly.
    Code(u16),
    /// Status code falls inside a named class.
    Class(StatusClass),
    /// Pattern text, compiled as a regex at evaluation time and matched
    /// anywhere in the body. Compilation failures are faults, not mismatches.
    Pattern(String),
    /// Pre-compiled pattern, matched anywhere in the body.
    Compiled(Regex),
}

impl Expectation {
    /// Whether this expectation matches the response, before polarity.
    pub fn matches(&self, response: &Response) -> Result<bool, regex::Error> {
        Ok(match self {
            Expectation::Code(code) => response.status() == *code,
            Expectation::Class(class) => class.contains(response.status()),
            Expectation::Pattern(pattern) => Regex::new(pattern)?.is_match(response.body()),
            Expectation::Compiled(regex) => regex.is_match(response.body()),
        })
    }
}

impl From<u16> for Expectation {
    fn from(code: u16) -> Self {
        Expectation::Code(code)
    }
}

impl From<StatusClass> for Expectation {
    fn from(class: StatusClass) -> Self {
        Expectation::Class(class)
    }
}

impl From<&str> for Expectation {
    fn from(pattern: &str) -> Self {
        Expectation::Pattern(pattern.to_string())
    }
}

impl From<String> for Expectation {
    fn from(pattern: String) -> Self {
        Expectation::Pattern(pattern)
    }
}

impl From<Regex> for Expectation {
    fn from(regex: Regex) -> Self {
        Expectation::Compiled(regex)
    }
}

/// Evaluate expectations in order against the given polarity.
///
/// Returns `false` at the first value whose match result differs from
/// `affirm`; later values are not evaluated. Patterns are compiled fresh on
/// every call, so repeated evaluation of the same set is stable.
pub(crate) fn evaluate<I>(
    response: &Response,
    affirm: bool,
    states: I,
) -> Result<bool, regex::Error>
where
    I: IntoIterator<Item = Expectation>,
{
    for state in states {
        let matched = state.matches(response)?;
        tracing::debug!(?state, affirm, matched, "expectation evaluated");
        if matched != affirm {
            return Ok(false);
        }
    }
    Ok(true)
}
