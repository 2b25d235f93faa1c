pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod lifecycle;
pub mod manifest;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseError, Result};
