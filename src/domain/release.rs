use crate::domain::prerelease::validate_channel;
use crate::domain::version::{BumpCategory, SemanticVersion};
use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Increment directive handed to [`SemanticVersion::increment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    /// Continue the current pre-release train
    Prerelease,
}

impl ReleaseType {
    /// Start a new pre-release train at `category`
    pub fn pre(category: BumpCategory) -> Self {
        match category {
            BumpCategory::Major => ReleaseType::Premajor,
            BumpCategory::Minor => ReleaseType::Preminor,
            BumpCategory::Patch => ReleaseType::Prepatch,
        }
    }

    /// The plain bump category, or `None` for pre-release directives
    pub fn category(self) -> Option<BumpCategory> {
        match self {
            ReleaseType::Major => Some(BumpCategory::Major),
            ReleaseType::Minor => Some(BumpCategory::Minor),
            ReleaseType::Patch => Some(BumpCategory::Patch),
            _ => None,
        }
    }

    pub fn is_prerelease(self) -> bool {
        self.category().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Premajor => "premajor",
            ReleaseType::Preminor => "preminor",
            ReleaseType::Prepatch => "prepatch",
            ReleaseType::Prerelease => "prerelease",
        }
    }
}

impl From<BumpCategory> for ReleaseType {
    fn from(category: BumpCategory) -> Self {
        match category {
            BumpCategory::Major => ReleaseType::Major,
            BumpCategory::Minor => ReleaseType::Minor,
            BumpCategory::Patch => ReleaseType::Patch,
        }
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            "premajor" => Ok(ReleaseType::Premajor),
            "preminor" => Ok(ReleaseType::Preminor),
            "prepatch" => Ok(ReleaseType::Prepatch),
            "prerelease" => Ok(ReleaseType::Prerelease),
            other => Err(ReleaseError::release(format!(
                "Unknown release type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a `release-as` value asks for: an exact version or a release type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    Exact(SemanticVersion),
    Type(ReleaseType),
}

impl FromStr for ReleaseTarget {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Ok(release_type) = s.parse::<ReleaseType>() {
            return Ok(ReleaseTarget::Type(release_type));
        }

        SemanticVersion::parse(s)
            .map(ReleaseTarget::Exact)
            .map_err(|_| {
                ReleaseError::release(format!(
                    "'{}' is neither a semantic version nor a release type \
                     (major, minor, patch, premajor, preminor, prepatch, prerelease)",
                    s
                ))
            })
    }
}

impl fmt::Display for ReleaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseTarget::Exact(version) => write!(f, "{}", version),
            ReleaseTarget::Type(release_type) => write!(f, "{}", release_type),
        }
    }
}

/// Everything the caller wants from one release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Explicit `release-as` override
    pub explicit: Option<ReleaseTarget>,
    /// Bump category inferred from commit history
    pub inferred: Option<BumpCategory>,
    /// Pre-release channel; `None` requests a stable release
    pub channel: Option<String>,
    /// Keep the current version untouched (unless an exact version is given)
    pub first_release: bool,
}

impl ReleaseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit release target from a user supplied string
    pub fn with_release_as(mut self, release_as: &str) -> Result<Self> {
        self.explicit = Some(release_as.parse()?);
        Ok(self)
    }

    pub fn with_inferred(mut self, category: BumpCategory) -> Self {
        self.inferred = Some(category);
        self
    }

    /// Set the pre-release channel, validating it as a semver identifier
    pub fn with_channel(mut self, channel: impl Into<String>) -> Result<Self> {
        let channel = channel.into();
        validate_channel(&channel)?;
        self.channel = Some(channel);
        Ok(self)
    }

    pub fn with_first_release(mut self, first_release: bool) -> Self {
        self.first_release = first_release;
        self
    }

    /// Whether the resolver needs a bump category from commit analysis
    pub fn needs_inference(&self) -> bool {
        self.explicit.is_none() && !self.first_release
    }
}
