//! Output management and formatting.
//!
//! [`OutputManager`] is the single place that writes to the terminal.  It
//! also implements the core `ProgressReporter` port, so the step runner's
//! "⏳ description... ✅/❌" lines come out with the same colour and quiet
//! rules as everything else.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use kickoff_core::{application::ports::ProgressReporter, error::KickoffError};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode — errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── ProgressReporter port ─────────────────────────────────────────────────────

/// The step-runner feedback contract.
///
/// Write failures are swallowed: there is nothing sensible to do about a
/// terminal that cannot be written to mid-step, and a reporting failure must
/// never fail the step itself.
impl ProgressReporter for OutputManager {
    fn step_started(&self, description: &str) {
        if self.quiet {
            return;
        }
        // No newline: the outcome glyph completes this line.
        let _ = self.term.write_str(&format!("\u{23f3} {description}...")); // ⏳
    }

    fn step_succeeded(&self) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(" \u{2705}"); // ✅
    }

    fn step_failed(&self, error: &KickoffError) {
        if !self.quiet {
            // Finish the pending "⏳ description..." line.
            let _ = self.term.write_line(" \u{274c}"); // ❌
        }
        let _ = self.error(&error.to_string());
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
