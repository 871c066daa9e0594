use crate::util::process::ProcessError;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a build run stops early
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Entry script not found: {}", .0.display())]
    MissingEntryScript(PathBuf),

    #[error("System dependency install failed")]
    SystemDependencies(#[source] ProcessError),

    #[error("Python dependency install failed")]
    LanguageDependencies(#[source] ProcessError),

    #[error("Packaging failed")]
    Packaging(#[source] ProcessError),
}
