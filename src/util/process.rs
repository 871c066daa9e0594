use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Failure of an external command
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to execute: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", describe_code(.code))]
    ExitStatus { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Runs external programs to completion.
///
/// The orchestrator only cares whether a command succeeded, so that is all
/// this reports. Tests swap in a recording fake.
pub trait ProcessRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), ProcessError>;
}

/// Runs commands on the host with stdio passed through to the terminal.
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new(working_dir: Option<&Path>) -> Self {
        Self {
            working_dir: working_dir.map(Path::to_path_buf),
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), ProcessError> {
        run_streaming(program, args, self.working_dir.as_deref())
    }
}

/// Run a command with output streamed to the terminal.
/// Uses current_dir to set working directory (doesn't change process cwd).
pub fn run_streaming<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    working_dir: Option<&Path>,
) -> Result<(), ProcessError> {
    let command = command_line(program, args);
    tracing::debug!(%command, "spawning");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    let status = match cmd.status() {
        Ok(status) => status,
        Err(source) => return Err(ProcessError::Spawn { command, source }),
    };

    tracing::debug!(%command, code = ?status.code(), "finished");

    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::ExitStatus {
            command,
            code: status.code(),
        })
    }
}

/// Render a program and its arguments as a single line for messages
pub fn command_line<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let args = format_args(args);
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args)
    }
}

/// Format args for error messages
fn format_args<S: AsRef<OsStr>>(args: &[S]) -> String {
    args.iter()
        .map(|s| s.as_ref().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Records every command it is asked to run and fails on demand.
#[cfg(test)]
#[derive(Default)]
pub struct FakeRunner {
    pub calls: Vec<Vec<String>>,
    /// Fail the first command whose line contains this fragment
    pub fail_on: Option<String>,
}

#[cfg(test)]
impl FakeRunner {
    pub fn failing_on(fragment: &str) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(fragment.to_string()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.join(" ")).collect()
    }
}

#[cfg(test)]
impl ProcessRunner for FakeRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), ProcessError> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        let line = call.join(" ");
        self.calls.push(call);

        match &self.fail_on {
            Some(fragment) if line.contains(fragment.as_str()) => Err(ProcessError::ExitStatus {
                command: line,
                code: Some(1),
            }),
            _ => Ok(()),
        }
    }
}
