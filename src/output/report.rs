//! Run summary printed after generation

use std::io;
use std::path::Path;

use termcolor::{Color, ColorSpec, WriteColor};

/// Counters accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source files classified
    pub files_scanned: usize,
    /// Companion files written (or that would be, in a dry run)
    pub files_written: usize,
    /// Handlers found across all files
    pub handlers: usize,
    /// Files whose output could not be created
    pub skipped: usize,
}

impl RunSummary {
    pub fn record_scanned(&mut self, handlers: usize) {
        self.files_scanned += 1;
        self.handlers += handlers;
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// One line per generated file: `wrote server_test.go (2 handlers)`.
pub fn print_written<W: WriteColor>(out: &mut W, dest: &Path, handlers: usize, dry_run: bool) -> io::Result<()> {
    let mut verb = ColorSpec::new();
    verb.set_fg(Some(Color::Green)).set_bold(true);
    out.set_color(&verb)?;
    write!(out, "{}", if dry_run { "would write" } else { "wrote" })?;
    out.reset()?;
    writeln!(out, " {} ({})", dest.display(), plural(handlers, "handler"))
}

/// Totals line printed at the end of a run.
pub fn print_summary<W: WriteColor>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    write!(out, "{}", plural(summary.files_scanned, "file"))?;
    out.reset()?;
    write!(
        out,
        " scanned, {} found, {} generated",
        plural(summary.handlers, "handler"),
        plural(summary.files_written, "file")
    )?;
    if summary.skipped > 0 {
        let mut warn = ColorSpec::new();
        warn.set_fg(Some(Color::Yellow));
        write!(out, ", ")?;
        out.set_color(&warn)?;
        write!(out, "{} skipped", summary.skipped)?;
        out.reset()?;
    }
    writeln!(out)
}
