use crate::domain::version::SemanticVersion;

/// Release tag naming: `<prefix><version>`, e.g. `v1.2.3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPrefix {
    pub prefix: String,
}

impl TagPrefix {
    /// Create a new tag prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPrefix {
            prefix: prefix.into(),
        }
    }

    /// Format a version as a tag name
    /// Example: prefix="v", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Extract the release version from a tag name carrying this prefix
    ///
    /// Returns `None` for tags with another prefix or a non-semver remainder.
    pub fn parse(&self, tag: &str) -> Option<SemanticVersion> {
        let rest = tag.strip_prefix(self.prefix.as_str())?;
        // An empty prefix still tolerates the conventional "v"
        let starts_like_version = rest.starts_with(|c: char| c.is_ascii_digit())
            || (self.prefix.is_empty() && rest.starts_with('v'));
        if !starts_like_version {
            return None;
        }
        SemanticVersion::parse(rest).ok()
    }
}

impl Default for TagPrefix {
    fn default() -> Self {
        TagPrefix::new("v")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let prefix = TagPrefix::default();
        assert_eq!(prefix.format(&SemanticVersion::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_format_custom_prefix() {
        let prefix = TagPrefix::new("release-");
        assert_eq!(
            prefix.format(&SemanticVersion::parse("1.2.3-rc.1").unwrap()),
            "release-1.2.3-rc.1"
        );
    }

    #[test]
    fn test_parse_matching_tag() {
        let prefix = TagPrefix::default();
        assert_eq!(prefix.parse("v1.2.3"), Some(SemanticVersion::new(1, 2, 3)));
        assert_eq!(
            prefix.parse("v1.0.1-dev.0").map(|v| v.to_string()),
            Some("1.0.1-dev.0".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_other_tags() {
        let prefix = TagPrefix::default();
        assert_eq!(prefix.parse("release-1.2.3"), None);
        assert_eq!(prefix.parse("vnext"), None);
    }

    #[test]
    fn test_parse_empty_prefix() {
        let prefix = TagPrefix::new("");
        assert_eq!(prefix.parse("1.2.3"), Some(SemanticVersion::new(1, 2, 3)));
        assert_eq!(prefix.parse("v1.2.3"), Some(SemanticVersion::new(1, 2, 3)));
    }
}
