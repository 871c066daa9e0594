use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Destination for human-readable progress output.
///
/// Created once at startup and handed to whatever needs to talk to the
/// user, so nothing writes to a global stream behind the caller's back.
pub trait Reporter {
    /// Write one line of output
    fn line(&mut self, msg: &str);

    /// Print a success message with checkmark
    fn success(&mut self, msg: &str) {
        self.line(&format!("  ✓ {}", msg));
    }

    /// Print an error message with X
    fn error(&mut self, msg: &str) {
        self.line(&format!("  ✗ {}", msg));
    }

    /// Print a warning message
    fn warn(&mut self, msg: &str) {
        self.line(&format!("  ⚠ {}", msg));
    }

    /// Print a dimmed/secondary message
    fn dim(&mut self, msg: &str) {
        self.line(&format!("  {}", msg));
    }

    /// Print an info message
    fn info(&mut self, msg: &str) {
        self.line(msg);
    }

    /// Print a title framed by horizontal rules
    fn banner(&mut self, lines: &[&str]) {
        let rule = "=".repeat(RULE_WIDTH);
        self.line(&rule);
        for l in lines {
            self.line(l);
        }
        self.line(&rule);
    }
}

/// Reporter backed by any writer (stdout in production)
pub struct Terminal<W: Write> {
    out: W,
}

impl Terminal<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl Terminal<io::Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> Reporter for Terminal<W> {
    fn line(&mut self, msg: &str) {
        // Nothing useful to do if the terminal went away
        let _ = writeln!(self.out, "{}", msg);
        let _ = self.out.flush();
    }
}

/// Print an error message with X to stderr, for failures that end the run
pub fn error(msg: &str) {
    Terminal::stderr().error(msg);
}

/// Captures output lines in memory
#[cfg(test)]
#[derive(Default)]
pub struct Recorder {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Recorder {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

#[cfg(test)]
impl Reporter for Recorder {
    fn line(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }
}
