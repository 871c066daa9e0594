//! Test harness for cfst-build integration tests
//!
//! Provides throwaway project directories, binary execution, and custom
//! assertions for testing end-to-end CLI behavior.

mod assertions;
mod fixture;
mod runner;

pub use assertions::BuildAssertions;
pub use fixture::Project;
pub use runner::{cfst_build, RunResult};
