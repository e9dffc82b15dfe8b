//! Decode options.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ParsePolicyError;

/// What to do with an enumeration token that no variant recognizes.
///
/// `Preserve` keeps the raw token in the enum's `Unknown` variant so that it
/// re-encodes verbatim; `Reject` fails the decode with
/// [`DecodeError::UnknownToken`](crate::DecodeError::UnknownToken).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTokenPolicy {
    #[default]
    Preserve,
    Reject,
}

impl UnknownTokenPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownTokenPolicy::Preserve => "preserve",
            UnknownTokenPolicy::Reject => "reject",
        }
    }

    pub const fn all() -> &'static [UnknownTokenPolicy] {
        &[UnknownTokenPolicy::Preserve, UnknownTokenPolicy::Reject]
    }
}

impl fmt::Display for UnknownTokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownTokenPolicy {
    type Err = ParsePolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "preserve" => Ok(UnknownTokenPolicy::Preserve),
            "reject" => Ok(UnknownTokenPolicy::Reject),
            _ => Err(ParsePolicyError(value.to_string())),
        }
    }
}

/// Options threaded through a single decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub unknown_tokens: UnknownTokenPolicy,
}

impl DecodeOptions {
    /// Options that fail on any unrecognized enumeration token.
    pub fn strict() -> Self {
        Self {
            unknown_tokens: UnknownTokenPolicy::Reject,
        }
    }
}
