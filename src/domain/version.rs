use crate::domain::prerelease::Prerelease;
use crate::domain::release::ReleaseType;
use crate::error::{ReleaseError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Build metadata is accepted when parsing but not retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
}

impl SemanticVersion {
    /// Create a new stable version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
        }
    }

    pub fn with_prerelease(mut self, pre: Prerelease) -> Self {
        self.pre = pre;
        self
    }

    /// Parse a version string (e.g., "v1.2.3" -> 1.2.3, "=1.0.0-dev.0" -> 1.0.0-dev.0)
    pub fn parse(input: &str) -> Result<Self> {
        let clean = input
            .trim()
            .trim_start_matches('=')
            .trim_start_matches(['v', 'V']);

        let parsed = semver::Version::parse(clean).map_err(|e| {
            ReleaseError::version(format!("'{}' is not a semantic version: {}", input, e))
        })?;

        Ok(SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: Prerelease::parse(parsed.pre.as_str())?,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// The same version without its pre-release
    pub fn base(&self) -> Self {
        SemanticVersion::new(self.major, self.minor, self.patch)
    }

    /// The bump category the current pre-release train was opened under.
    ///
    /// A `pre<category>` bump leaves that component as the lowest non-zero
    /// one, so the category is read from the lowest non-zero component:
    /// `1.0.1-dev.0` is a patch train, `1.1.0-dev.2` a minor train and
    /// `2.0.0-rc.1` a major train. `0.0.0-*` has no active category.
    pub fn active_category(&self) -> Option<BumpCategory> {
        if self.patch != 0 {
            Some(BumpCategory::Patch)
        } else if self.minor != 0 {
            Some(BumpCategory::Minor)
        } else if self.major != 0 {
            Some(BumpCategory::Major)
        } else {
            None
        }
    }

    /// Increment by a release type, using `channel` as the pre-release identifier.
    ///
    /// Stable bumps on a pre-release of the same target finalize it instead of
    /// incrementing again (`1.0.1-dev.3` + patch = `1.0.1`, `2.0.0-rc.1` + major = `2.0.0`).
    ///
    /// # Errors
    /// Invalid-input error when a component would exceed `u64::MAX`.
    pub fn increment(&self, release: ReleaseType, channel: &str) -> Result<Self> {
        let in_prerelease = self.is_prerelease();

        let version = match release {
            ReleaseType::Major => {
                if in_prerelease && self.minor == 0 && self.patch == 0 {
                    self.base()
                } else {
                    SemanticVersion::new(self.next_major()?, 0, 0)
                }
            }
            ReleaseType::Minor => {
                if in_prerelease && self.patch == 0 {
                    self.base()
                } else {
                    SemanticVersion::new(self.major, self.next_minor()?, 0)
                }
            }
            ReleaseType::Patch => {
                if in_prerelease {
                    self.base()
                } else {
                    SemanticVersion::new(self.major, self.minor, self.next_patch()?)
                }
            }
            ReleaseType::Premajor => SemanticVersion::new(self.next_major()?, 0, 0)
                .with_prerelease(Prerelease::EMPTY.bump(channel)?),
            ReleaseType::Preminor => SemanticVersion::new(self.major, self.next_minor()?, 0)
                .with_prerelease(Prerelease::EMPTY.bump(channel)?),
            ReleaseType::Prepatch => {
                SemanticVersion::new(self.major, self.minor, self.next_patch()?)
                    .with_prerelease(Prerelease::EMPTY.bump(channel)?)
            }
            ReleaseType::Prerelease => {
                let target = if in_prerelease {
                    self.clone()
                } else {
                    SemanticVersion::new(self.major, self.minor, self.next_patch()?)
                };
                let pre = target.pre.bump(channel)?;
                target.with_prerelease(pre)
            }
        };
        Ok(version)
    }

    fn next_major(&self) -> Result<u64> {
        checked_next(self.major, "major", self)
    }

    fn next_minor(&self) -> Result<u64> {
        checked_next(self.minor, "minor", self)
    }

    fn next_patch(&self) -> Result<u64> {
        checked_next(self.patch, "patch", self)
    }
}

fn checked_next(component: u64, name: &str, version: &SemanticVersion) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        ReleaseError::version(format!(
            "cannot increment the {} component of {}: it is already at its maximum",
            name, version
        ))
    })
}

impl FromStr for SemanticVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}

/// Granularity of a version increment, ordered `Patch < Minor < Major`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BumpCategory {
    Patch,
    Minor,
    Major,
}

impl BumpCategory {
    /// Priority used when comparing an in-flight pre-release train with a new bump
    ///
    /// major = 2, minor = 1, patch = 0
    pub fn priority(self) -> u8 {
        match self {
            BumpCategory::Patch => 0,
            BumpCategory::Minor => 1,
            BumpCategory::Major => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BumpCategory::Major => "major",
            BumpCategory::Minor => "minor",
            BumpCategory::Patch => "patch",
        }
    }
}

impl FromStr for BumpCategory {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpCategory::Major),
            "minor" => Ok(BumpCategory::Minor),
            "patch" => Ok(BumpCategory::Patch),
            other => Err(ReleaseError::release(format!(
                "Unknown bump category '{}': expected major, minor or patch",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
