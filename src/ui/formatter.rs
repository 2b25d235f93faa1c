//! Pure formatting functions for console output.
//!
//! Everything here builds strings; printing and the silent switch live in
//! [`super::Reporter`].

use console::style;

use crate::boundary::BoundaryWarning;

/// Leading symbol of a checkpoint line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    /// Completed step (green, or yellow during a dry run)
    Tick,
    /// Informational hint (blue)
    Info,
    /// Skipped step (red)
    Cross,
}

/// Format a checkpoint line, substituting each `%s` with a bold argument.
///
/// Surplus arguments are ignored; missing ones leave the placeholder empty.
///
/// # Examples
/// ```ignore
/// format_checkpoint("tagging release %s", &["1.1.0"], Figure::Tick, false);
/// // "✔ tagging release 1.1.0" (tick green, version bold)
/// ```
pub fn format_checkpoint(template: &str, args: &[&str], figure: Figure, dry_run: bool) -> String {
    let mut line = String::new();
    let mut args = args.iter();

    for (i, part) in template.split("%s").enumerate() {
        if i > 0 {
            if let Some(arg) = args.next() {
                line.push_str(&style(arg).bold().to_string());
            }
        }
        line.push_str(part);
    }

    format!("{} {}", format_figure(figure, dry_run), line)
}

fn format_figure(figure: Figure, dry_run: bool) -> String {
    match figure {
        Figure::Tick if dry_run => style("✔").yellow().to_string(),
        Figure::Tick => style("✔").green().to_string(),
        Figure::Info => style("ℹ").blue().to_string(),
        Figure::Cross => style("✖").red().to_string(),
    }
}

/// Format a boundary warning with a yellow warning sign.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Format an error message in red.
pub fn format_error(message: &str) -> String {
    style(message).red().to_string()
}

/// Frame text that would have been written during a dry run.
pub fn format_preview(content: &str) -> String {
    format!("\n---\n{}\n---\n", style(content.trim()).dim())
}
