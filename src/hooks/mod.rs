//! Lifecycle scripts for extensibility
//!
//! Users can run shell commands around each release stage:
//! - prebump / postbump: around the manifest version bump
//! - prechangelog / postchangelog: around the changelog update
//! - precommit / postcommit: around the release commit
//! - pretag / posttag: around the release tag

pub mod executor;
pub mod lifecycle;

pub use executor::{HookExecutor, HookOutput};
pub use lifecycle::{HookContext, HookType};
