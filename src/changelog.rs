//! Changelog rendering and prepending
//!
//! Each release adds a section like:
//!
//! ```text
//! <a name="1.1.0"></a>
//! # 1.1.0 (2024-03-01)
//!
//!
//! ### Features
//!
//! * **cli:** add --dry-run (1a2b3c4)
//! ```
//!
//! Patch releases use a second-level heading.

use crate::domain::{ParsedCommit, SemanticVersion};
use crate::error::Result;
use crate::git::CommitInfo;
use crate::ui::Reporter;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Header written at the top of the changelog file
pub const HEADER: &str = "# Change Log\n\n";

const ANCHOR: &str = "<a name=";

/// Commit types that get a section, in output order
const SECTIONS: [(&str, &str); 4] = [
    ("feat", "Features"),
    ("fix", "Bug Fixes"),
    ("perf", "Performance Improvements"),
    ("revert", "Reverts"),
];

/// Render the changelog section for `version`
pub fn render_section(version: &SemanticVersion, date: NaiveDate, commits: &[CommitInfo]) -> String {
    let heading = if version.patch != 0 { "##" } else { "#" };
    let mut out = format!(
        "<a name=\"{version}\"></a>\n{heading} {version} ({})\n\n",
        date.format("%Y-%m-%d")
    );

    let parsed: Vec<(&CommitInfo, ParsedCommit)> = commits
        .iter()
        .map(|commit| (commit, ParsedCommit::parse(&commit.message)))
        .collect();

    for (kind, title) in SECTIONS {
        let entries: Vec<String> = parsed
            .iter()
            .filter(|(_, p)| p.r#type == kind || (kind == "feat" && p.r#type == "feature"))
            .map(|(commit, p)| entry(commit, p))
            .collect();

        if !entries.is_empty() {
            out.push_str(&format!("\n### {}\n\n", title));
            for line in entries {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    let notes: Vec<String> = parsed
        .iter()
        .filter(|(_, p)| p.is_breaking_change)
        .map(|(_, p)| {
            let note = p.breaking_note.as_deref().unwrap_or(&p.description);
            match &p.scope {
                Some(scope) => format!("* **{}:** {}", scope, note),
                None => format!("* {}", note),
            }
        })
        .collect();

    if !notes.is_empty() {
        out.push_str("\n### BREAKING CHANGES\n\n");
        for note in notes {
            out.push_str(&note);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("\n\n");
    out
}

fn entry(commit: &CommitInfo, parsed: &ParsedCommit) -> String {
    match &parsed.scope {
        Some(scope) => format!(
            "* **{}:** {} ({})",
            scope,
            parsed.description,
            commit.short_hash()
        ),
        None => format!("* {} ({})", parsed.description, commit.short_hash()),
    }
}

/// Combine a new section with the previous file content
///
/// Anything before the first release anchor of the old content (the previous
/// header) is dropped, and trailing newlines are collapsed to one.
pub fn prepend(section: &str, old_content: &str) -> String {
    let old = match old_content.find(ANCHOR) {
        Some(start) => &old_content[start..],
        None => old_content,
    };

    let body = format!("{}{}", section, old);
    format!("{}\n{}\n", HEADER, body.trim_end_matches('\n'))
}

/// Write `section` to the top of `workdir/infile`
///
/// A missing file is created first. During a dry run the section is only
/// printed.
pub fn write_changelog(
    workdir: &Path,
    infile: &Path,
    section: &str,
    reporter: &Reporter,
) -> Result<()> {
    let path = workdir.join(infile);
    let display = infile.display().to_string();

    if !path.exists() {
        reporter.checkpoint("created %s", &[&display]);
        if !reporter.is_dry_run() {
            fs::write(&path, "\n")?;
        }
    }

    reporter.checkpoint("outputting changes to %s", &[&display]);

    if reporter.is_dry_run() {
        reporter.preview(section);
        return Ok(());
    }

    let old_content = fs::read_to_string(&path)?;
    fs::write(&path, prepend(section, &old_content))?;
    tracing::debug!(path = %path.display(), "wrote changelog");
    Ok(())
}
