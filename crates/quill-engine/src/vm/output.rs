//! Destinations for the `println` intrinsic

use crate::frontend::types::Scalar;
use std::io::Write;

/// Receives one line per `println` call
pub trait Output {
    /// `None` prints an empty line
    fn println(&mut self, value: Option<Scalar>) -> std::io::Result<()>;
}

fn format_line(value: Option<Scalar>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn println(&mut self, value: Option<Scalar>) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", format_line(value))
    }
}

/// Collects printed lines in memory
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CapturedOutput {
    lines: Vec<String>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Every line followed by a newline
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }
}

impl Output for CapturedOutput {
    fn println(&mut self, value: Option<Scalar>) -> std::io::Result<()> {
        self.lines.push(format_line(value));
        Ok(())
    }
}

impl<O: Output + ?Sized> Output for &mut O {
    fn println(&mut self, value: Option<Scalar>) -> std::io::Result<()> {
        (**self).println(value)
    }
}
