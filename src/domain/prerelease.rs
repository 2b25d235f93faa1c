//! Pre-release identifiers for semantic versions
//!
//! A pre-release is an ordered sequence of dot-separated identifiers, each either
//! numeric or alphanumeric, e.g. `dev.0`, `beta.3` or `0`.
//! According to semver.org: https://semver.org/#spec-item-9

use crate::error::{ReleaseError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Numeric identifier without leading zeros
    Numeric(u64),
    /// Alphanumeric identifier (`[0-9A-Za-z-]+` with at least one non-digit)
    AlphaNumeric(String),
}

impl Identifier {
    /// Parse an identifier from a string
    ///
    /// # Returns
    /// * `Ok(Identifier)` - Numeric when the string is all digits, alphanumeric otherwise
    /// * `Err` - If the string is empty, has invalid characters or a leading zero
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl FromStr for Identifier {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ReleaseError::version("Empty pre-release identifier"));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ReleaseError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            )));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return Err(ReleaseError::version(format!(
                    "Numeric pre-release identifier has a leading zero: '{}'",
                    s
                )));
            }
            let n = s.parse::<u64>().map_err(|_| {
                ReleaseError::version(format!("Pre-release number out of range: '{}'", s))
            })?;
            return Ok(Identifier::Numeric(n));
        }

        Ok(Identifier::AlphaNumeric(s.to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Ordered pre-release identifier sequence; empty for stable versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Prerelease {
    identifiers: Vec<Identifier>,
}

impl Prerelease {
    pub const EMPTY: Prerelease = Prerelease {
        identifiers: Vec::new(),
    };

    pub fn new(identifiers: Vec<Identifier>) -> Self {
        Prerelease { identifiers }
    }

    /// Parse a dot-separated pre-release; the empty string yields [`Prerelease::EMPTY`]
    ///
    /// # Examples
    /// ```ignore
    /// let pr = Prerelease::parse("beta.1")?;
    /// assert_eq!(pr.to_string(), "beta.1");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Prerelease::EMPTY);
        }

        let identifiers = s
            .split('.')
            .map(Identifier::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Prerelease { identifiers })
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Advance the pre-release counter, moving to `channel` when it differs.
    ///
    /// - empty: becomes `0`
    /// - otherwise the right-most numeric identifier is incremented, or `0` is
    ///   appended when there is none
    /// - a non-empty `channel` that is not already leading the sequence (followed
    ///   by a counter) resets the sequence to `<channel>.0`
    ///
    /// # Errors
    /// Invalid-input error when the counter is already `u64::MAX`.
    ///
    /// # Examples
    /// ```ignore
    /// assert_eq!(Prerelease::parse("dev.1")?.bump("dev")?.to_string(), "dev.2");
    /// assert_eq!(Prerelease::parse("beta.4")?.bump("dev")?.to_string(), "dev.0");
    /// assert_eq!(Prerelease::EMPTY.bump("")?.to_string(), "0");
    /// ```
    pub fn bump(&self, channel: &str) -> Result<Self> {
        if !channel.is_empty() {
            let continues = self
                .identifiers
                .first()
                .is_some_and(|id| id.to_string() == channel)
                && self.identifiers.get(1).is_some_and(Identifier::is_numeric);

            if !continues {
                let head = Identifier::parse(channel)
                    .unwrap_or_else(|_| Identifier::AlphaNumeric(channel.to_string()));
                return Ok(Prerelease {
                    identifiers: vec![head, Identifier::Numeric(0)],
                });
            }
        }

        let mut identifiers = self.identifiers.clone();
        let counter = identifiers.iter_mut().rev().find_map(|id| match id {
            Identifier::Numeric(n) => Some(n),
            Identifier::AlphaNumeric(_) => None,
        });
        match counter {
            Some(n) => {
                *n = n.checked_add(1).ok_or_else(|| {
                    ReleaseError::version(format!(
                        "cannot increment pre-release '{}': counter is already at its maximum",
                        self
                    ))
                })?;
            }
            None => identifiers.push(Identifier::Numeric(0)),
        }

        Ok(Prerelease { identifiers })
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.identifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

/// Validate a prerelease channel name
///
/// The empty channel is allowed and means "numeric identifiers only".
pub fn validate_channel(channel: &str) -> Result<()> {
    if channel.is_empty() {
        return Ok(());
    }
    Identifier::parse(channel).map(|_| ()).map_err(|_| {
        ReleaseError::release(format!(
            "Invalid prerelease channel '{}': only [0-9A-Za-z-] are allowed",
            channel
        ))
    })
}

/// Precedence per semver.org: numeric identifiers sort before alphanumeric
/// ones, a stable version (empty pre-release) sorts after any pre-release.
impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prerelease {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.identifiers.cmp(&other.identifiers),
        }
    }
}

impl PartialOrd for Prerelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
