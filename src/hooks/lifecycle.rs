use std::collections::HashMap;
use std::fmt;

/// Lifecycle scripts available around the release stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookType {
    Prebump,
    Postbump,
    Prechangelog,
    Postchangelog,
    Precommit,
    Postcommit,
    Pretag,
    Posttag,
}

impl HookType {
    /// Every script in pipeline order
    pub const ALL: [HookType; 8] = [
        HookType::Prebump,
        HookType::Postbump,
        HookType::Prechangelog,
        HookType::Postchangelog,
        HookType::Precommit,
        HookType::Postcommit,
        HookType::Pretag,
        HookType::Posttag,
    ];

    /// Key of the script in the `[scripts]` config table
    pub fn name(&self) -> &'static str {
        match self {
            HookType::Prebump => "prebump",
            HookType::Postbump => "postbump",
            HookType::Prechangelog => "prechangelog",
            HookType::Postchangelog => "postchangelog",
            HookType::Precommit => "precommit",
            HookType::Postcommit => "postcommit",
            HookType::Pretag => "pretag",
            HookType::Posttag => "posttag",
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Context information passed to a lifecycle script
#[derive(Debug, Clone)]
pub struct HookContext {
    pub hook_type: HookType,
    /// Version being released, unknown before the bump is resolved
    pub new_version: Option<String>,
    /// Version read from the manifests or the latest tag
    pub previous_version: Option<String>,
    /// Release tag name, known once the version is resolved
    pub tag: Option<String>,
}

impl HookContext {
    pub fn new(hook_type: HookType) -> Self {
        HookContext {
            hook_type,
            new_version: None,
            previous_version: None,
            tag: None,
        }
    }

    pub fn with_previous_version(mut self, version: impl Into<String>) -> Self {
        self.previous_version = Some(version.into());
        self
    }

    pub fn with_release(mut self, version: impl Into<String>, tag: impl Into<String>) -> Self {
        self.new_version = Some(version.into());
        self.tag = Some(tag.into());
        self
    }

    /// Full shell command line for `command`
    ///
    /// Once the new version is known it is appended as `--new-version="X"`.
    pub fn command_line(&self, command: &str) -> String {
        match &self.new_version {
            Some(version) => format!("{} --new-version=\"{}\"", command, version),
            None => command.to_string(),
        }
    }

    /// Convert context to environment variables for the script
    ///
    /// Maps context fields to RELEASE_ME_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert(
            "RELEASE_ME_HOOK".to_string(),
            self.hook_type.name().to_string(),
        );

        if let Some(ref version) = self.new_version {
            env.insert("RELEASE_ME_NEW_VERSION".to_string(), version.clone());
        }

        if let Some(ref version) = self.previous_version {
            env.insert("RELEASE_ME_PREVIOUS_VERSION".to_string(), version.clone());
        }

        if let Some(ref tag) = self.tag {
            env.insert("RELEASE_ME_TAG_NAME".to_string(), tag.clone());
        }

        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_names() {
        let names: Vec<&str> = HookType::ALL.iter().map(HookType::name).collect();
        assert_eq!(
            names,
            vec![
                "prebump",
                "postbump",
                "prechangelog",
                "postchangelog",
                "precommit",
                "postcommit",
                "pretag",
                "posttag"
            ]
        );
    }

    #[test]
    fn test_command_line_without_version() {
        let ctx = HookContext::new(HookType::Prebump);
        assert_eq!(ctx.command_line("./next-version.sh"), "./next-version.sh");
    }

    #[test]
    fn test_command_line_appends_new_version() {
        let ctx = HookContext::new(HookType::Posttag).with_release("1.1.0", "v1.1.0");
        assert_eq!(
            ctx.command_line("./notify.sh"),
            "./notify.sh --new-version=\"1.1.0\""
        );
    }

    #[test]
    fn test_hook_context_to_env_vars_all_fields() {
        let ctx = HookContext::new(HookType::Pretag)
            .with_previous_version("1.0.0")
            .with_release("1.1.0", "v1.1.0");

        let env = ctx.to_env_vars();
        assert_eq!(env.get("RELEASE_ME_HOOK"), Some(&"pretag".to_string()));
        assert_eq!(
            env.get("RELEASE_ME_NEW_VERSION"),
            Some(&"1.1.0".to_string())
        );
        assert_eq!(
            env.get("RELEASE_ME_PREVIOUS_VERSION"),
            Some(&"1.0.0".to_string())
        );
        assert_eq!(env.get("RELEASE_ME_TAG_NAME"), Some(&"v1.1.0".to_string()));
    }

    #[test]
    fn test_hook_context_to_env_vars_minimal() {
        let env = HookContext::new(HookType::Prebump).to_env_vars();
        assert_eq!(env.len(), 1);
        assert!(env.get("RELEASE_ME_NEW_VERSION").is_none());
    }
}
