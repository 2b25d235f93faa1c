//! Analysis engine for determining the bump category from commits

pub mod version_analyzer;

pub use version_analyzer::VersionAnalyzer;
