//! Language-feature versions used for gating generation.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A `major.minor` language version. Ordering is numeric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LanguageVersion {
    /// Major component.
    pub major: u16,
    /// Minor component.
    pub minor: u16,
}

impl LanguageVersion {
    /// Creates a version.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// The lowest possible version; nothing is gated below it.
    pub const MIN: Self = Self::new(0, 0);

    /// The highest possible version.
    pub const LATEST: Self = Self::new(u16::MAX, u16::MAX);

    /// Returns true if this version satisfies the given minimum.
    #[must_use]
    pub fn supports(self, minimum: Self) -> bool {
        self >= minimum
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for LanguageVersion {
    type Err = Error;

    /// Parses `"8"`, `"8.0"`, or `"latest"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self::LATEST);
        }

        let invalid = |reason: &str| Error::invalid_option("language_version", s, reason);

        let (major, minor) = match trimmed.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (trimmed, "0"),
        };
        let major = major
            .parse::<u16>()
            .map_err(|_| invalid("major component is not a number"))?;
        let minor = minor
            .parse::<u16>()
            .map_err(|_| invalid("minor component is not a number"))?;

        Ok(Self::new(major, minor))
    }
}
