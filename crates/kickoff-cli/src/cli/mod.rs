//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kickoff",
    bin_name = "kickoff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Kickoff a Laravel project setup",
    long_about = "Kickoff copies its opinionated stubs into an existing Laravel \
                  project, merges composer.json, installs the standard package \
                  set, and runs the framework maintenance tasks.",
    after_help = "EXAMPLES:\n\
        \x20 kickoff start acme \"Demo App\"\n\
        \x20 kickoff start acme demo ~/code/demo\n\
        \x20 kickoff start acme demo --stubs ./my-stubs -v\n\
        \x20 kickoff completions bash > /usr/share/bash-completion/completions/kickoff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bootstrap an existing Laravel project.
    #[command(
        visible_alias = "s",
        about = "Kickoff a new Laravel project setup",
        after_help = "EXAMPLES:\n\
            \x20 kickoff start acme \"Demo App\"          # current directory\n\
            \x20 kickoff start acme demo ~/code/demo\n\
            \x20 kickoff start acme demo -v              # stream command output"
    )]
    Start(StartArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kickoff completions bash > ~/.local/share/bash-completion/completions/kickoff\n\
            \x20 kickoff completions zsh  > ~/.zfunc/_kickoff\n\
            \x20 kickoff completions fish > ~/.config/fish/completions/kickoff.fish"
    )]
    Completions(CompletionsArgs),
}

// ── start ─────────────────────────────────────────────────────────────────────

/// Arguments for `kickoff start`.
#[derive(Debug, Args)]
pub struct StartArgs {
    /// The project owner, substituted into the generated README.
    #[arg(value_name = "OWNER", help = "The project owner")]
    pub owner: String,

    /// The project name, substituted into generated files and snake_cased
    /// into the database name.
    #[arg(value_name = "NAME", help = "The project name")]
    pub name: String,

    /// The project path.  Must already contain a Laravel project
    /// (composer.json + artisan).
    #[arg(
        value_name = "PATH",
        help = "The project path (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    /// Copy stubs from a directory instead of the builtin payload.
    #[arg(
        long = "stubs",
        value_name = "DIR",
        help = "Stub directory overriding the builtin payload"
    )]
    pub stubs: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kickoff completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
