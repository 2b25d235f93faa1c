//! Release type resolution and version transitions
//!
//! Pure functions: given the current version, the requested pre-release
//! channel, an optional explicit `release-as` value and the bump category
//! inferred from commits, decide the next version. Nothing here touches the
//! filesystem or git, so a failure guarantees no later stage has run.
//!
//! A pre-release train keeps going while new work does not outrank the
//! category it was opened under:
//!
//! ```text
//! 1.0.0        + patch, dev  -> prepatch   -> 1.0.1-dev.0
//! 1.0.1-dev.0  + patch, dev  -> prerelease -> 1.0.1-dev.1
//! 1.0.1-dev.1  + minor, dev  -> preminor   -> 1.1.0-dev.0
//! 1.1.0-dev.0  + minor, dev  -> prerelease -> 1.1.0-dev.1
//! 1.1.0-dev.2  + patch, dev  -> prerelease -> 1.1.0-dev.3
//! ```

use crate::domain::{BumpCategory, ReleaseRequest, ReleaseTarget, ReleaseType, SemanticVersion};
use crate::error::{ReleaseError, Result};
use std::fmt;
use tracing::debug;

/// Decide how to increment `current` for a bump of `inferred`.
///
/// - no channel: stable release, `inferred` unchanged
/// - channel, stable `current`: start a new train with `pre<inferred>`
/// - channel, `current` in a train: continue (`prerelease`) when the train's
///   category equals `inferred` or outranks it, otherwise restart at
///   `pre<inferred>`
///
/// A train without an active category (`0.0.0-*`) always restarts.
pub fn resolve_release_type(
    channel: Option<&str>,
    inferred: BumpCategory,
    current: &SemanticVersion,
) -> ReleaseType {
    if channel.is_none() {
        return ReleaseType::from(inferred);
    }

    if !current.is_prerelease() {
        return ReleaseType::pre(inferred);
    }

    let active = current.active_category();
    if active.is_none() {
        debug!(%current, "pre-release has no active category, restarting train");
    }

    let same_category = active == Some(inferred);
    let outranks = active.is_some_and(|category| category.priority() > inferred.priority());

    if same_category || outranks {
        ReleaseType::Prerelease
    } else {
        ReleaseType::pre(inferred)
    }
}

/// Apply a directive to `current`.
///
/// An exact version is returned as is, whatever `current` and `channel` are.
/// A release type increments `current`, using `channel` (or no identifier
/// when absent) for pre-release directives.
///
/// # Errors
/// Invalid-input error when the increment overflows a version component.
pub fn compute_next_version(
    directive: &ReleaseTarget,
    current: &SemanticVersion,
    channel: Option<&str>,
) -> Result<SemanticVersion> {
    match directive {
        ReleaseTarget::Exact(version) => Ok(version.clone()),
        ReleaseTarget::Type(release_type) => {
            current.increment(*release_type, channel.unwrap_or_default())
        }
    }
}

/// Outcome of resolving a [`ReleaseRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// First release: the current version is kept
    FirstRelease(SemanticVersion),
    /// An exact version was requested
    Exact(SemanticVersion),
    /// The current version was incremented
    Bumped {
        release_type: ReleaseType,
        version: SemanticVersion,
    },
}

impl Resolution {
    pub fn version(&self) -> &SemanticVersion {
        match self {
            Resolution::FirstRelease(version) | Resolution::Exact(version) => version,
            Resolution::Bumped { version, .. } => version,
        }
    }

    pub fn into_version(self) -> SemanticVersion {
        match self {
            Resolution::FirstRelease(version) | Resolution::Exact(version) => version,
            Resolution::Bumped { version, .. } => version,
        }
    }

    pub fn release_type(&self) -> Option<ReleaseType> {
        match self {
            Resolution::Bumped { release_type, .. } => Some(*release_type),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::FirstRelease(version) => write!(f, "{} (first release)", version),
            Resolution::Exact(version) => write!(f, "{} (exact)", version),
            Resolution::Bumped {
                release_type,
                version,
            } => write!(f, "{} ({})", version, release_type),
        }
    }
}

/// Resolve the next version for a full request.
///
/// Precedence: exact `release-as` version, then first release, then an
/// explicit release type, then the inferred bump category.
///
/// # Errors
/// Invalid-input error when no bump category is available or the next
/// version does not fit in a `u64` component.
pub fn resolve(request: &ReleaseRequest, current: &SemanticVersion) -> Result<Resolution> {
    if let Some(ReleaseTarget::Exact(version)) = &request.explicit {
        debug!(%current, %version, "exact release version requested");
        return Ok(Resolution::Exact(version.clone()));
    }

    if request.first_release {
        debug!(%current, "first release, keeping current version");
        return Ok(Resolution::FirstRelease(current.clone()));
    }

    let channel = request.channel.as_deref();
    let release_type = match &request.explicit {
        Some(ReleaseTarget::Type(requested)) => match requested.category() {
            Some(category) => resolve_release_type(channel, category, current),
            None => *requested,
        },
        _ => {
            let inferred = request.inferred.ok_or_else(|| {
                ReleaseError::release("no release type requested and none inferred from commits")
            })?;
            resolve_release_type(channel, inferred, current)
        }
    };

    let version = compute_next_version(&ReleaseTarget::Type(release_type), current, channel)?;
    debug!(%current, %release_type, %version, "resolved next version");

    Ok(Resolution::Bumped {
        release_type,
        version,
    })
}
