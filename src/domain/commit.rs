use regex::Regex;
use std::sync::LazyLock;

static SCOPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)\(([^)]+)\)(!?):\s*(.*)").expect("scoped commit pattern is valid")
});
static BREAKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)!:\s*(.*)").expect("breaking commit pattern is valid"));
static PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+):\s*(.*)").expect("plain commit pattern is valid"));

const BREAKING_FOOTERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
    /// Text following a `BREAKING CHANGE:` footer, if any
    pub breaking_note: Option<String>,
}

impl ParsedCommit {
    /// Parse a commit message in the Conventional Commits format
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text
    pub fn parse(message: &str) -> Self {
        let breaking_note = breaking_note(message);

        if let Some(captures) = SCOPED.captures(message) {
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            return ParsedCommit {
                r#type: capture(&captures, 1),
                scope: captures.get(2).map(|m| m.as_str().to_string()),
                description: capture(&captures, 4),
                is_breaking_change: has_exclamation || breaking_note.is_some(),
                breaking_note,
            };
        }

        if let Some(captures) = BREAKING.captures(message) {
            return ParsedCommit {
                r#type: capture(&captures, 1),
                scope: None,
                description: capture(&captures, 2),
                is_breaking_change: true,
                breaking_note,
            };
        }

        if let Some(captures) = PLAIN.captures(message) {
            return ParsedCommit {
                r#type: capture(&captures, 1),
                scope: None,
                description: capture(&captures, 2),
                is_breaking_change: breaking_note.is_some(),
                breaking_note,
            };
        }

        // Default: non-conventional commit
        ParsedCommit {
            r#type: "chore".to_string(),
            scope: None,
            description: message.lines().next().unwrap_or_default().to_string(),
            is_breaking_change: breaking_note.is_some(),
            breaking_note,
        }
    }

    /// Whether the message contains any of the given breaking change indicators
    pub fn mentions_any(message: &str, indicators: &[String]) -> bool {
        indicators
            .iter()
            .any(|indicator| !indicator.is_empty() && message.contains(indicator.as_str()))
    }
}

fn capture(captures: &regex::Captures<'_>, index: usize) -> String {
    captures
        .get(index)
        .map(|m| m.as_str().trim_end().to_string())
        .unwrap_or_default()
}

fn breaking_note(message: &str) -> Option<String> {
    BREAKING_FOOTERS.iter().find_map(|footer| {
        message.find(footer).map(|start| {
            message[start + footer.len()..]
                .split("\n\n")
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
    })
}
