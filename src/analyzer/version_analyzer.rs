use crate::config::ConventionalCommitsConfig;
use crate::domain::{BumpCategory, ParsedCommit};
use crate::git::CommitInfo;

/// Analyzes commits to determine the bump category
pub struct VersionAnalyzer {
    config: ConventionalCommitsConfig,
}

impl VersionAnalyzer {
    pub fn new(config: ConventionalCommitsConfig) -> Self {
        VersionAnalyzer { config }
    }

    /// Analyze repository commits; see [`VersionAnalyzer::analyze_messages`]
    pub fn analyze_commits(&self, commits: &[CommitInfo]) -> BumpCategory {
        let messages: Vec<String> = commits.iter().map(|c| c.message.clone()).collect();
        self.analyze_messages(&messages)
    }

    /// Analyze commit messages and determine the bump category
    ///
    /// Any breaking change means major, any configured minor type means minor,
    /// everything else (including no commits at all) means patch.
    pub fn analyze_messages(&self, messages: &[String]) -> BumpCategory {
        let mut has_features = false;

        for message in messages {
            let parsed = ParsedCommit::parse(message);

            if parsed.is_breaking_change
                || ParsedCommit::mentions_any(message, &self.config.breaking_change_indicators)
            {
                return BumpCategory::Major;
            }

            if self.config.minor_types.contains(&parsed.r#type) {
                has_features = true;
            }
        }

        if has_features {
            BumpCategory::Minor
        } else {
            BumpCategory::Patch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> VersionAnalyzer {
        VersionAnalyzer::new(ConventionalCommitsConfig::default())
    }

    fn messages(list: &[&str]) -> Vec<String> {
        list.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_analyze_major() {
        let msgs = messages(&["feat: new feature", "fix(api)!: breaking change"]);
        assert_eq!(analyzer().analyze_messages(&msgs), BumpCategory::Major);
    }

    #[test]
    fn test_analyze_minor() {
        let msgs = messages(&["feat: new feature", "fix: bug fix"]);
        assert_eq!(analyzer().analyze_messages(&msgs), BumpCategory::Minor);
    }

    #[test]
    fn test_analyze_patch() {
        let msgs = messages(&["fix: bug fix", "refactor: code cleanup"]);
        assert_eq!(analyzer().analyze_messages(&msgs), BumpCategory::Patch);
    }

    #[test]
    fn test_analyze_no_commits() {
        assert_eq!(analyzer().analyze_messages(&[]), BumpCategory::Patch);
    }

    #[test]
    fn test_analyze_non_conventional() {
        let msgs = messages(&["Update readme", "wip"]);
        assert_eq!(analyzer().analyze_messages(&msgs), BumpCategory::Patch);
    }

    #[test]
    fn test_analyze_feature_alias() {
        let msgs = messages(&["feature(auth): add oauth support"]);
        assert_eq!(analyzer().analyze_messages(&msgs), BumpCategory::Minor);
    }

    #[test]
    fn test_analyze_breaking_change_via_footer() {
        let msgs =
            messages(&["fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y"]);
        assert_eq!(analyzer().analyze_messages(&msgs), BumpCategory::Major);
    }

    #[test]
    fn test_custom_indicators_and_types() {
        let config = ConventionalCommitsConfig {
            breaking_change_indicators: vec!["[breaking]".to_string()],
            minor_types: vec!["add".to_string()],
        };
        let analyzer = VersionAnalyzer::new(config);

        assert_eq!(
            analyzer.analyze_messages(&messages(&["add: widgets"])),
            BumpCategory::Minor
        );
        assert_eq!(
            analyzer.analyze_messages(&messages(&["feat: widgets"])),
            BumpCategory::Patch
        );
        assert_eq!(
            analyzer.analyze_messages(&messages(&["chore: drop v1 api [breaking]"])),
            BumpCategory::Major
        );
    }

    #[test]
    fn test_analyze_commits() {
        let commits = vec![
            CommitInfo::new("a1", "fix: one"),
            CommitInfo::new("b2", "feat(cli): two"),
        ];
        assert_eq!(analyzer().analyze_commits(&commits), BumpCategory::Minor);
    }
}
