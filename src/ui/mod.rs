//! User interface module - console reporting for release runs.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - [`Reporter`], which prints unless the run is silent

pub mod formatter;

pub use formatter::Figure;

use crate::boundary::BoundaryWarning;

/// Prints checkpoints, warnings and errors for one release run.
///
/// A silent reporter prints nothing. A dry-run reporter marks completed steps
/// in yellow, since nothing was actually written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    silent: bool,
    dry_run: bool,
}

impl Reporter {
    pub fn new(silent: bool, dry_run: bool) -> Self {
        Reporter { silent, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Report a completed step; each `%s` in `template` takes the next argument.
    pub fn checkpoint(&self, template: &str, args: &[&str]) {
        self.print_line(template, args, Figure::Tick);
    }

    /// Report a hint for the user
    pub fn info(&self, template: &str, args: &[&str]) {
        self.print_line(template, args, Figure::Info);
    }

    /// Report a step that was skipped
    pub fn skipped(&self, template: &str, args: &[&str]) {
        self.print_line(template, args, Figure::Cross);
    }

    pub fn warn(&self, warning: &BoundaryWarning) {
        tracing::debug!(%warning, "boundary warning");
        if !self.silent {
            eprintln!("{}", formatter::format_boundary_warning(warning));
        }
    }

    pub fn error(&self, message: &str) {
        if !self.silent {
            eprintln!("{}", formatter::format_error(message));
        }
    }

    /// Show content that a dry run would have written
    pub fn preview(&self, content: &str) {
        if !self.silent {
            println!("{}", formatter::format_preview(content));
        }
    }

    fn print_line(&self, template: &str, args: &[&str], figure: Figure) {
        if !self.silent {
            println!(
                "{}",
                formatter::format_checkpoint(template, args, figure, self.dry_run)
            );
        }
    }
}
