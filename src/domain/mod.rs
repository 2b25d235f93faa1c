//! Domain logic - pure release rules independent of git and the filesystem

pub mod commit;
pub mod prerelease;
pub mod release;
pub mod tag;
pub mod version;

pub use commit::ParsedCommit;
pub use prerelease::{Identifier, Prerelease};
pub use release::{ReleaseRequest, ReleaseTarget, ReleaseType};
pub use tag::TagPrefix;
pub use version::{BumpCategory, SemanticVersion};
