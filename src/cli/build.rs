//! The build command
//!
//! cfst-build [--static] [--dry-run [--json]] [-C <dir>]

use crate::cli::Cli;
use crate::config::BuildConfig;
use crate::orchestrator::{Host, Orchestrator, ProjectFiles};
use crate::plan::{BuildMode, BuildPlan};
use crate::platform::PlatformInfo;
use crate::util::process::{self, SystemRunner};
use crate::util::ui::{Reporter, Terminal};
use anyhow::Result;
use serde::Serialize;

/// Plan as printed by --dry-run --json
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    platform: &'a PlatformInfo,
    files: &'a ProjectFiles,
    plan: &'a BuildPlan,
}

/// Run the build (or dry run) described by the command line
pub fn run(cli: &Cli) -> Result<()> {
    let config = BuildConfig::load_from_dir(&cli.project_dir)?;
    let host = Host::detect(&config);
    let mode = BuildMode::from_flag(cli.static_build);

    // JSON goes to stdout alone, progress moves to stderr
    let mut terminal: Box<dyn Reporter> = if cli.json {
        Box::new(Terminal::stderr())
    } else {
        Box::new(Terminal::stdout())
    };
    let ui = terminal.as_mut();

    ui.banner(&["Cloudflare SpeedTest multi-platform build tool"]);

    let mut runner = SystemRunner::new(Some(cli.project_dir.as_path()));
    let mut orchestrator =
        Orchestrator::new(&cli.project_dir, config, host.clone(), mode, &mut runner, &mut *ui);

    if cli.dry_run {
        let files = orchestrator.check_files()?;
        let plan = orchestrator.plan();
        if cli.json {
            let report = PlanReport {
                platform: &host.platform,
                files: &files,
                plan: &plan,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_plan(ui, &host, &files, &plan);
        }
        return Ok(());
    }

    orchestrator.run()?;

    ui.info("");
    ui.info("All build steps completed.");
    Ok(())
}

fn print_plan(ui: &mut dyn Reporter, host: &Host, files: &ProjectFiles, plan: &BuildPlan) {
    let platform = &host.platform;
    ui.info("");
    ui.info("Build plan");
    ui.dim(&format!(
        "Host: {} {} -> {}-{}",
        platform.os_raw, platform.arch_raw, platform.os_canonical, platform.arch_canonical
    ));
    ui.dim(&format!("Mode: {}", plan.mode));
    ui.dim(&format!("Entry script: {}", files.entry_script.display()));
    match &files.requirements {
        Some(path) => ui.dim(&format!("Requirements: {}", path.display())),
        None => ui.dim("Requirements: none"),
    }
    if plan.mode.is_static() {
        match host.package_manager {
            Some(manager) => ui.dim(&format!("System packages via: {}", manager)),
            None => ui.dim("System packages via: none found (will be skipped)"),
        }
    }
    ui.dim(&format!("Python: {}", host.python));
    ui.dim(&format!("Output: {}", plan.artifact_path().display()));
    ui.dim(&format!(
        "Command: {}",
        process::command_line(&plan.program, &plan.tool_arguments)
    ));
}
