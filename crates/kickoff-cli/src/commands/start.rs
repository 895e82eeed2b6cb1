//! Implementation of the `kickoff start` command.
//!
//! Responsibility: translate CLI arguments into a `Project`, call the core
//! setup service, and display results. No business logic lives here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use kickoff_adapters::{LocalFilesystem, ShellRunner, builtin_stubs};
use kickoff_core::{
    application::SetupService,
    domain::{Project, StubSource},
};

use crate::{
    cli::{StartArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `kickoff start` command.
///
/// Dispatch sequence:
/// 1. Resolve the target path (argument, or current directory)
/// 2. Build the project descriptor (name validation happens in core)
/// 3. Resolve the stub source (--stubs flag > config > builtin payload)
/// 4. Run the setup service; preconditions abort, step failures don't
/// 5. Print the completion message (unconditionally) and a failure tally
#[instrument(skip_all, fields(owner = %args.owner, project = %args.name))]
pub fn execute(
    args: StartArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let path = match args.path {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| CliError::IoError {
            message: "failed to resolve current directory".into(),
            source: e,
        })?,
    };

    // 2. Build descriptor
    let project = Project::new(args.owner.as_str(), args.name.as_str(), path)
        .map_err(|e| CliError::Core(e.into()))?;

    // 3. Resolve stub source
    let stubs = resolve_stub_source(args.stubs, &config);

    debug!(
        path = %project.path().display(),
        database = %project.database_name(),
        stubs = %stubs.describe(),
        "target resolved"
    );

    // 4. Build adapters and run
    let service = SetupService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ShellRunner::new()),
        Box::new(output.clone()),
    );

    output.header(&format!(
        "\n\u{1f389} Let's kickoff your {}/{} now!\n",
        project.owner(),
        project.name(),
    ))?;

    info!(project = %project.name(), path = %project.path().display(), "setup started");

    // Any `-v` switches external commands to passthrough mode.
    let summary = service
        .run(&project, &stubs, global.verbose > 0)
        .map_err(CliError::Core)?;

    info!(
        total = summary.total_steps,
        failed = summary.failed_steps,
        "setup completed"
    );

    // 5. Completion message - printed whether or not steps failed; the tally
    //    line below is what distinguishes a clean run from a bumpy one.
    output.success("\n\u{1f389} Project setup completed successfully!\n")?;

    if !summary.all_succeeded() {
        output.warning(&format!(
            "{} of {} steps reported failures; re-run with -v to stream command output",
            summary.failed_steps, summary.total_steps,
        ))?;
    }

    if !global.quiet {
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project.path().display()))?;
        output.print("  composer run dev")?;
    }

    Ok(())
}

/// The `--stubs` flag wins over the config file; otherwise use the payload
/// compiled into the binary.
fn resolve_stub_source(flag: Option<PathBuf>, config: &AppConfig) -> StubSource {
    flag.or_else(|| config.stubs.local_path.clone())
        .map(StubSource::Directory)
        .unwrap_or_else(|| StubSource::Builtin(builtin_stubs::stub_tree()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_for_stub_source() {
        let config = AppConfig {
            stubs: crate::config::StubConfig {
                local_path: Some(PathBuf::from("/from/config")),
            },
            ..AppConfig::default()
        };

        let source = resolve_stub_source(Some(PathBuf::from("/from/flag")), &config);
        match source {
            StubSource::Directory(dir) => assert_eq!(dir, PathBuf::from("/from/flag")),
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn config_is_used_when_no_flag() {
        let config = AppConfig {
            stubs: crate::config::StubConfig {
                local_path: Some(PathBuf::from("/from/config")),
            },
            ..AppConfig::default()
        };

        assert!(matches!(
            resolve_stub_source(None, &config),
            StubSource::Directory(dir) if dir == PathBuf::from("/from/config")
        ));
    }

    #[test]
    fn builtin_is_the_default() {
        match resolve_stub_source(None, &AppConfig::default()) {
            StubSource::Builtin(tree) => assert!(!tree.is_empty()),
            other => panic!("unexpected source: {other:?}"),
        }
    }
}
