//! Build orchestration
//!
//! CheckFiles -> [static] InstallSystemDeps -> InstallLanguageDeps -> Build
//!
//! Each step gates the next. The first failure ends the run; nothing is
//! retried or rolled back.

use crate::config::BuildConfig;
use crate::deps::{self, InstallOutcome, PackageManager};
use crate::error::BuildError;
use crate::plan::{BuildMode, BuildPlan};
use crate::platform::PlatformInfo;
use crate::util::process::ProcessRunner;
use crate::util::ui::Reporter;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Facts about the machine, gathered once at startup
#[derive(Debug, Clone)]
pub struct Host {
    pub platform: PlatformInfo,
    pub package_manager: Option<PackageManager>,
    pub python: String,
}

impl Host {
    pub fn detect(config: &BuildConfig) -> Self {
        Self {
            platform: PlatformInfo::detect(),
            package_manager: PackageManager::detect(),
            python: config.python(),
        }
    }
}

/// Files found by the precondition check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFiles {
    pub entry_script: PathBuf,
    pub requirements: Option<PathBuf>,
}

pub struct Orchestrator<'a> {
    project_dir: PathBuf,
    config: BuildConfig,
    host: Host,
    mode: BuildMode,
    runner: &'a mut dyn ProcessRunner,
    ui: &'a mut dyn Reporter,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        project_dir: &Path,
        config: BuildConfig,
        host: Host,
        mode: BuildMode,
        runner: &'a mut dyn ProcessRunner,
        ui: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            config,
            host,
            mode,
            runner,
            ui,
        }
    }

    /// The packaging invocation this run would perform
    pub fn plan(&self) -> BuildPlan {
        BuildPlan::new(&self.host.platform, self.mode, &self.config)
    }

    /// Check the entry script (required) and requirements file (optional).
    /// Paths in the result are relative to the project directory.
    pub fn check_files(&mut self) -> Result<ProjectFiles, BuildError> {
        let entry_script = self.config.entry_script.clone();
        if !self.project_dir.join(&entry_script).is_file() {
            return Err(BuildError::MissingEntryScript(entry_script));
        }

        let requirements = self.config.requirements.clone();
        let requirements = if self.project_dir.join(&requirements).is_file() {
            Some(requirements)
        } else {
            self.ui.warn(&format!(
                "{} not found, skipping project dependencies",
                requirements.display()
            ));
            None
        };

        Ok(ProjectFiles {
            entry_script,
            requirements,
        })
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(&mut self) -> Result<BuildPlan, BuildError> {
        tracing::debug!(
            os = %self.host.platform.os_canonical,
            arch = %self.host.platform.arch_canonical,
            mode = ?self.mode,
            "starting build"
        );

        let files = self.check_files()?;

        if self.mode.is_static() {
            self.install_system_deps()?;
        }
        self.install_python_deps(files.requirements.as_deref())?;

        let plan = self.plan();
        self.build(&plan)?;
        Ok(plan)
    }

    fn install_system_deps(&mut self) -> Result<(), BuildError> {
        match deps::install_system_deps(
            &mut *self.runner,
            &mut *self.ui,
            &self.host.platform,
            self.host.package_manager,
            self.config.use_sudo,
        ) {
            InstallOutcome::Installed => Ok(()),
            InstallOutcome::Skipped(reason) => {
                tracing::debug!(%reason, "system dependencies skipped");
                Ok(())
            }
            InstallOutcome::Failed(e) => Err(BuildError::SystemDependencies(e)),
        }
    }

    fn install_python_deps(&mut self, requirements: Option<&Path>) -> Result<(), BuildError> {
        match deps::install_python_deps(
            &mut *self.runner,
            &mut *self.ui,
            &self.host.python,
            &self.config.packager,
            requirements,
        ) {
            InstallOutcome::Installed | InstallOutcome::Skipped(_) => Ok(()),
            InstallOutcome::Failed(e) => Err(BuildError::LanguageDependencies(e)),
        }
    }

    fn build(&mut self, plan: &BuildPlan) -> Result<(), BuildError> {
        let title = match plan.mode {
            BuildMode::Static => "Building static Linux ARM64 executable (OpenWRT)".to_string(),
            BuildMode::Normal => format!(
                "Building {}-{} executable",
                self.host.platform.os_canonical, self.host.platform.arch_canonical
            ),
        };
        let output = format!("Output name: {}", plan.output_name);

        self.ui.info("");
        self.ui.banner(&[title.as_str(), output.as_str()]);

        self.runner
            .run(&plan.program, &plan.tool_arguments)
            .map_err(BuildError::Packaging)?;

        self.ui.info("");
        self.ui.success(&format!(
            "Build succeeded: {}",
            plan.artifact_path().display()
        ));
        Ok(())
    }
}
